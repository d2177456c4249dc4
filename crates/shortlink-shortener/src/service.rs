use async_trait::async_trait;
use jiff::Timestamp;
use shortlink_core::{
    Fingerprint, LinkDetail, LinkError, LinkKey, LinkStore, ShortCode, ShortenRequest, Shortener,
    StoreError,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, LinkError>;

/// Fingerprint value marking a deliberately invalidated link.
///
/// A fingerprint record holding this value is treated as absent. Nothing in
/// this crate writes it.
pub const EXPIRED_SENTINEL: &str = "{}";

/// Longest validity window accepted, 100 years.
///
/// Every backend can represent an expiry this far out, so a request within
/// the cap never fails on its ttl after a counter value has been taken.
pub const MAX_EXPIRATION_IN_MINUTES: i64 = 100 * 365 * 24 * 60;

/// A concrete implementation of the [`Shortener`] trait.
///
/// The service holds no mutable state of its own: the id counter and every
/// record live in the [`LinkStore`], which is the only point of
/// synchronization between instances.
///
/// Deduplication is best effort. Two concurrent calls for the same URL can
/// both miss the fingerprint lookup and each allocate their own code; both
/// codes stay resolvable until they expire.
#[derive(Debug)]
pub struct ShortenerService<S> {
    store: Arc<S>,
}

impl<S> Clone for ShortenerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LinkStore> ShortenerService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Checks the request and converts the validity window into a ttl.
    fn validate(request: &ShortenRequest) -> Result<Duration> {
        if request.url.is_empty() {
            return Err(LinkError::InvalidInput("url cannot be empty".to_string()));
        }

        if request.expiration_in_minutes <= 0 {
            return Err(LinkError::InvalidInput(format!(
                "expiration must be a positive number of minutes, got {}",
                request.expiration_in_minutes
            )));
        }

        if request.expiration_in_minutes > MAX_EXPIRATION_IN_MINUTES {
            return Err(LinkError::InvalidInput(format!(
                "expiration must be at most {} minutes, got {}",
                MAX_EXPIRATION_IN_MINUTES, request.expiration_in_minutes
            )));
        }

        // bounded by the cap above, so this cannot overflow or go negative
        let secs = request.expiration_in_minutes.unsigned_abs() * 60;
        Ok(Duration::from_secs(secs))
    }

    /// Looks up a live code previously issued for the same URL.
    async fn existing_code(&self, fingerprint: &Fingerprint) -> Result<Option<ShortCode>> {
        let key = LinkKey::Fingerprint(fingerprint.clone());

        match self.store.get_if_present(&key).await? {
            None => Ok(None),
            Some(value) if value == EXPIRED_SENTINEL => {
                trace!(key = %key, "fingerprint marked as expired");
                Ok(None)
            }
            Some(value) => ShortCode::parse(value).map(Some).map_err(|e| {
                LinkError::Backend(StoreError::InvalidData(format!(
                    "value at '{key}' is not a short code: {e}"
                )))
            }),
        }
    }

    /// Takes the next id from the global counter and encodes it.
    async fn allocate_code(&self) -> Result<ShortCode> {
        let id = self.store.increment(&LinkKey::Counter).await?;
        let id = u64::try_from(id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                StoreError::InvalidData(format!("counter returned a non-positive id: {id}"))
            })?;
        Ok(ShortCode::from_id(id))
    }

    fn parse_code(code: &str) -> Result<ShortCode> {
        // codes that fail to parse could never have been issued
        ShortCode::parse(code).map_err(|_| LinkError::NotFound)
    }
}

#[async_trait]
impl<S: LinkStore> Shortener for ShortenerService<S> {
    async fn shorten(&self, request: &ShortenRequest) -> Result<ShortCode> {
        let ttl = Self::validate(request)?;
        let fingerprint = Fingerprint::of(&request.url);

        if let Some(code) = self.existing_code(&fingerprint).await? {
            debug!(code = %code, "reusing live short code");
            return Ok(code);
        }

        let code = self.allocate_code().await?;

        // Serialize first so a failure here leaves nothing behind.
        let detail = LinkDetail {
            url: request.url.clone(),
            created_at: Timestamp::now(),
            expiration_in_minutes: request.expiration_in_minutes,
        }
        .to_json()?;

        // Detail before url, fingerprint last: if a store applies these one by
        // one and fails midway, a resolvable code always has its detail and a
        // dedup hit always points at a resolvable code.
        let entries = [
            (LinkKey::Detail(code.clone()), detail),
            (LinkKey::Url(code.clone()), request.url.clone()),
            (LinkKey::Fingerprint(fingerprint), code.to_string()),
        ];
        self.store.set_all_with_expiry(&entries, ttl).await?;

        debug!(code = %code, ttl_secs = ttl.as_secs(), "created short code");
        Ok(code)
    }

    async fn unshorten(&self, code: &str) -> Result<String> {
        let code = Self::parse_code(code)?;
        trace!(code = %code, "resolving short code");

        self.store
            .get_if_present(&LinkKey::Url(code))
            .await?
            .ok_or(LinkError::NotFound)
    }

    async fn shortlink_info(&self, code: &str) -> Result<LinkDetail> {
        let code = Self::parse_code(code)?;
        trace!(code = %code, "fetching short code detail");

        let json = self
            .store
            .get_if_present(&LinkKey::Detail(code))
            .await?
            .ok_or(LinkError::NotFound)?;
        LinkDetail::from_json(&json)
    }

    async fn ping(&self) -> Result<()> {
        Ok(self.store.ping().await?)
    }
}
