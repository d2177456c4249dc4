use sha2::{Digest, Sha256};
use std::fmt::Display;

/// A deterministic digest of a URL used as the deduplication key.
///
/// The digest is SHA-256 rendered as 64 lowercase hex characters, so it can be
/// embedded in a backend key as-is. It is never shown to users.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of `url`.
    pub fn of(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
