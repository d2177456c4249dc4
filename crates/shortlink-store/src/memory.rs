use crate::clock::{Clock, SystemClock};
use async_trait::async_trait;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use shortlink_core::store::{validate_ttl, Result};
use shortlink_core::{LinkKey, LinkStore, StoreError};
use std::time::Duration;
use tracing::trace;

/// In-memory storage entry.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expire_at: Option<Timestamp>,
}

impl Entry {
    fn is_expired(&self, now: Timestamp) -> bool {
        self.expire_at.is_some_and(|expire_at| now >= expire_at)
    }
}

/// In-process implementation of [`LinkStore`] using DashMap.
///
/// Expiry is passive, as in Redis: expired entries are never returned and
/// are dropped the next time they are touched. The clock is injectable so
/// tests can move time past a ttl without sleeping.
#[derive(Debug)]
pub struct InMemoryLinkStore<C = SystemClock> {
    entries: DashMap<String, Entry>,
    clock: C,
}

impl InMemoryLinkStore {
    /// Creates a new store driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryLinkStore<C> {
    /// Creates a new store that reads the time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
        }
    }

    /// Number of live entries, the counter included.
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .iter()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expire_at(&self, ttl: Duration) -> Result<Timestamp> {
        validate_ttl(ttl)?;
        let ttl = SignedDuration::try_from(ttl)
            .map_err(|e| StoreError::InvalidTtl(format!("ttl out of range: {e}")))?;
        self.clock
            .now()
            .checked_add(ttl)
            .map_err(|e| StoreError::InvalidTtl(format!("ttl out of range: {e}")))
    }

    fn live_value(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        let entry = self.entries.get(key)?;

        if entry.is_expired(now) {
            drop(entry);
            self.entries.remove_if(key, |_, e| e.is_expired(now));
            return None;
        }

        Some(entry.value.clone())
    }
}

#[async_trait]
impl<C: Clock> LinkStore for InMemoryLinkStore<C> {
    async fn increment(&self, key: &LinkKey) -> Result<i64> {
        let now = self.clock.now();
        let mut entry = self.entries.entry(key.to_string()).or_insert_with(|| Entry {
            value: "0".to_string(),
            expire_at: None,
        });

        if entry.is_expired(now) {
            entry.value = "0".to_string();
            entry.expire_at = None;
        }

        let current: i64 = entry.value.parse().map_err(|_| {
            StoreError::InvalidData(format!("value at '{key}' is not an integer"))
        })?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::InvalidData(format!("increment of '{key}' overflows")))?;
        entry.value = next.to_string();

        trace!(key = %key, value = next, "incremented counter");
        Ok(next)
    }

    async fn get_if_present(&self, key: &LinkKey) -> Result<Option<String>> {
        Ok(self.live_value(&key.to_string()))
    }

    async fn exists(&self, key: &LinkKey) -> Result<bool> {
        Ok(self.live_value(&key.to_string()).is_some())
    }

    async fn set_with_expiry(&self, key: &LinkKey, value: &str, ttl: Duration) -> Result<()> {
        let expire_at = self.expire_at(ttl)?;
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expire_at: Some(expire_at),
            },
        );
        trace!(key = %key, ttl = ?ttl, "stored value");
        Ok(())
    }

    async fn set_all_with_expiry(&self, entries: &[(LinkKey, String)], ttl: Duration) -> Result<()> {
        let expire_at = self.expire_at(ttl)?;
        for (key, value) in entries {
            self.entries.insert(
                key.to_string(),
                Entry {
                    value: value.clone(),
                    expire_at: Some(expire_at),
                },
            );
        }
        trace!(count = entries.len(), ttl = ?ttl, "stored values");
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
