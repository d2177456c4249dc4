use crate::detail::LinkDetail;
use crate::error::LinkError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, LinkError>;

/// Parameters for shortening a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenRequest {
    /// The original URL to be shortened.
    pub url: String,
    /// How long the link stays resolvable, in minutes. Must be positive.
    pub expiration_in_minutes: i64,
}

impl ShortenRequest {
    pub fn new(url: impl Into<String>, expiration_in_minutes: i64) -> Self {
        Self {
            url: url.into(),
            expiration_in_minutes,
        }
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a URL and returns its code.
    ///
    /// Shortening the same URL again while its link is live returns the
    /// existing code.
    async fn shorten(&self, request: &ShortenRequest) -> Result<ShortCode>;

    /// Resolves a code to the original URL.
    /// Returns [`LinkError::NotFound`] if the code is unknown or expired.
    async fn unshorten(&self, code: &str) -> Result<String>;

    /// Returns the detail record of a code.
    /// Returns [`LinkError::NotFound`] if the code is unknown or expired.
    async fn shortlink_info(&self, code: &str) -> Result<LinkDetail>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<()>;
}
