use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ShortenRequestBody {
    pub url: String,
    pub expiration_in_minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortlinkResponse {
    pub shortlink: String,
}

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    #[serde(default)]
    pub shortlink: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
