use thiserror::Error;

/// Failures reported by a link store backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store operation failed: {0}")]
    Operation(String),
    #[error("stored value is invalid: {0}")]
    InvalidData(String),
    #[error("invalid ttl: {0}")]
    InvalidTtl(String),
}

/// Errors returned by the shortening and resolution engine.
#[derive(Debug, Clone, Error)]
pub enum LinkError {
    /// The code is unknown or its record has expired.
    #[error("unknown short URL")]
    NotFound,
    #[error("backend failure: {0}")]
    Backend(#[from] StoreError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("serialization failure: {0}")]
    Serialization(String),
}

/// Coarse classification of a [`LinkError`], for boundary layers that need
/// to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    InvalidInput,
    Internal,
}

impl LinkError {
    pub fn class(&self) -> ErrorClass {
        match self {
            LinkError::NotFound => ErrorClass::NotFound,
            LinkError::InvalidInput(_) => ErrorClass::InvalidInput,
            LinkError::Backend(_) | LinkError::Serialization(_) => ErrorClass::Internal,
        }
    }
}
