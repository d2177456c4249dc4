mod link;

pub use link::{HealthResponse, InfoQuery, ShortenRequestBody, ShortlinkResponse};
