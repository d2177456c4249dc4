use crate::error::Result;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const REDIS_PORT: u16 = 6379;

/// Settings for a throwaway Redis container.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisServerConfig {
    /// Tag of the `redis` image to run.
    #[builder(default = "8.6.0".to_string(), setter(into))]
    pub image_tag: String,

    /// Extra time to wait after the ready message before handing out connections.
    #[builder(default = Duration::from_millis(200))]
    pub settle_time: Duration,
}

impl Default for RedisServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A single Redis instance running in a container.
///
/// The container is removed when this value is dropped.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
}

impl RedisServer {
    /// Starts a Redis container with the default settings.
    pub async fn start() -> Result<Self> {
        Self::start_with(RedisServerConfig::default()).await
    }

    pub async fn start_with(config: RedisServerConfig) -> Result<Self> {
        let container = GenericImage::new("redis", &config.image_tag)
            .with_exposed_port(REDIS_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await?;

        tokio::time::sleep(config.settle_time).await;

        Ok(Self { container })
    }

    pub async fn host(&self) -> Result<String> {
        let host = self.container.get_host().await?.to_string();

        match host.as_str() {
            "localhost" => Ok(String::from("127.0.0.1")),
            _ => Ok(host),
        }
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(REDIS_PORT).await?)
    }

    /// Returns `host:port` of the mapped Redis port.
    pub async fn addr(&self) -> Result<String> {
        Ok(format!("{}:{}", self.host().await?, self.port().await?))
    }

    /// Returns a `redis://` url for database `db`.
    pub async fn url(&self, db: i64) -> Result<String> {
        Ok(format!("redis://{}/{}", self.addr().await?, db))
    }

    /// Opens a multiplexed connection to database `db`.
    pub async fn connection(&self, db: i64) -> Result<redis::aio::MultiplexedConnection> {
        let client = redis::Client::open(self.url(db).await?)?;
        Ok(client.get_multiplexed_async_connection().await?)
    }
}
