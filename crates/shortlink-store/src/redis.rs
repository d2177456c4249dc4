use async_trait::async_trait;
use redis::AsyncCommands;
use shortlink_core::store::{validate_ttl, Result};
use shortlink_core::{LinkKey, LinkStore, StoreError};
use std::time::Duration;
use tracing::{debug, info, trace};

/// A Redis-based implementation of [`LinkStore`].
///
/// Keys are the rendered [`LinkKey`]s, values are plain strings, and ttls
/// are handed to Redis, which evicts expired records on its own.
#[derive(Debug, Clone)]
pub struct RedisLinkStore {
    conn: redis::aio::MultiplexedConnection,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    let lowercase = message.to_ascii_lowercase();
    if lowercase.contains("timed out") {
        StoreError::Timeout(message)
    } else if lowercase.contains("connection refused") || lowercase.contains("broken pipe") {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

/// Builds a `redis://` connection url from its parts.
///
/// An empty password is left out of the url.
pub fn connection_url(addr: &str, password: &str, db: i64) -> String {
    if password.is_empty() {
        format!("redis://{addr}/{db}")
    } else {
        format!("redis://:{password}@{addr}/{db}")
    }
}

impl RedisLinkStore {
    /// Creates a store over an existing multiplexed connection.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Opens a connection to `url` and checks it with a PING.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Unavailable(format!("invalid redis url: {e}")))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to connect to redis: {e}")))?;

        let store = Self::new(conn);
        store.ping().await?;
        info!("connected to redis");
        Ok(store)
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn increment(&self, key: &LinkKey) -> Result<i64> {
        let key = key.to_string();
        let mut conn = self.conn.clone();
        let value = conn
            .incr::<_, _, i64>(&key, 1)
            .await
            .map_err(|e| map_redis_error("failed to increment counter in redis", e))?;
        trace!(key = %key, value, "incremented counter");
        Ok(value)
    }

    async fn get_if_present(&self, key: &LinkKey) -> Result<Option<String>> {
        let key = key.to_string();
        let mut conn = self.conn.clone();
        let value = conn
            .get::<_, Option<String>>(&key)
            .await
            .map_err(|e| map_redis_error("failed to fetch value from redis", e))?;
        trace!(key = %key, hit = value.is_some(), "fetched value");
        Ok(value)
    }

    async fn exists(&self, key: &LinkKey) -> Result<bool> {
        let mut conn = self.conn.clone();
        conn.exists::<_, bool>(key.to_string())
            .await
            .map_err(|e| map_redis_error("failed to check key in redis", e))
    }

    async fn set_with_expiry(&self, key: &LinkKey, value: &str, ttl: Duration) -> Result<()> {
        validate_ttl(ttl)?;
        let key = key.to_string();
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(&key, value, ttl.as_secs())
            .await
            .map_err(|e| map_redis_error("failed to write value to redis", e))?;
        debug!(key = %key, ttl_secs = ttl.as_secs(), "stored value");
        Ok(())
    }

    async fn set_all_with_expiry(&self, entries: &[(LinkKey, String)], ttl: Duration) -> Result<()> {
        validate_ttl(ttl)?;
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            pipe.set_ex(key.to_string(), value, ttl.as_secs()).ignore();
        }

        let mut conn = self.conn.clone();
        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|e| map_redis_error("failed to write values to redis", e))?;
        debug!(count = entries.len(), ttl_secs = ttl.as_secs(), "stored values");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| map_redis_error("redis ping failed", e))?;
        Ok(())
    }
}
