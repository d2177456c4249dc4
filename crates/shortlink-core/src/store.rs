use crate::error::StoreError;
use crate::key::LinkKey;
use async_trait::async_trait;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, StoreError>;

/// The key-value backend holding the counter and all link records.
///
/// Implementations must make [`LinkStore::increment`] atomic across every
/// caller sharing the backend. Expiry is passive: a record whose ttl has
/// elapsed is simply absent. Failures are returned as-is and never retried.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Atomically increments the integer at `key` and returns the new value.
    /// A missing key counts as zero.
    async fn increment(&self, key: &LinkKey) -> Result<i64>;

    /// Returns the value at `key`, or `None` if it does not exist or has expired.
    async fn get_if_present(&self, key: &LinkKey) -> Result<Option<String>>;

    /// Checks whether `key` holds a live value.
    async fn exists(&self, key: &LinkKey) -> Result<bool>;

    /// Writes `value` at `key`, expiring after `ttl`.
    ///
    /// A ttl below one second is rejected with [`StoreError::InvalidTtl`].
    async fn set_with_expiry(&self, key: &LinkKey, value: &str, ttl: Duration) -> Result<()>;

    /// Writes several records sharing one ttl.
    ///
    /// The default implementation writes them one by one in order and stops at
    /// the first failure. Each write computes its own expiry, so the records
    /// expire at slightly different instants and a failure leaves the earlier
    /// records in place. Backends that can should override it so the records
    /// share one expiry instant and become visible together.
    async fn set_all_with_expiry(&self, entries: &[(LinkKey, String)], ttl: Duration) -> Result<()> {
        validate_ttl(ttl)?;
        for (key, value) in entries {
            self.set_with_expiry(key, value, ttl).await?;
        }
        Ok(())
    }

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<()>;
}

/// Rejects ttls the backends cannot express (they work in whole seconds).
pub fn validate_ttl(ttl: Duration) -> Result<()> {
    if ttl.as_secs() == 0 {
        return Err(StoreError::InvalidTtl(format!(
            "ttl must be at least one second, got {:?}",
            ttl
        )));
    }
    Ok(())
}
