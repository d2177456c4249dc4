use crate::error::LinkError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Metadata stored next to a short link, for display rather than redirection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkDetail {
    /// The original URL that was shortened.
    pub url: String,
    /// When the link was created.
    pub created_at: Timestamp,
    /// The validity window requested by the caller.
    pub expiration_in_minutes: i64,
}

impl LinkDetail {
    /// Serializes the record into the JSON stored by the backend.
    pub fn to_json(&self) -> Result<String, LinkError> {
        serde_json::to_string(self)
            .map_err(|e| LinkError::Serialization(format!("failed to encode link detail: {e}")))
    }

    /// Parses a record previously written with [`LinkDetail::to_json`].
    pub fn from_json(json: &str) -> Result<Self, LinkError> {
        serde_json::from_str(json)
            .map_err(|e| LinkError::Serialization(format!("failed to decode link detail: {e}")))
    }
}
