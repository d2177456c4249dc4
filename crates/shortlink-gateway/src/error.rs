use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shortlink_core::{ErrorClass, LinkError};
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request body or query could not be decoded or failed validation.
    BadRequest(String),
    /// A stored URL cannot be sent back as a `Location` header.
    InvalidLocation(String),
    Link(LinkError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl From<LinkError> for AppError {
    fn from(error: LinkError) -> Self {
        AppError::Link(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => {
                warn!(error = %message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::InvalidLocation(url) => {
                error!(url = %url, "stored url is not a valid location header");
                internal_error()
            }
            AppError::Link(error) => match error.class() {
                ErrorClass::NotFound => {
                    warn!(error = %error, "short link not found");
                    (StatusCode::NOT_FOUND, "unknown short URL".to_string())
                }
                ErrorClass::InvalidInput => {
                    warn!(error = %error, "rejected request");
                    (StatusCode::BAD_REQUEST, error.to_string())
                }
                ErrorClass::Internal => {
                    error!(error = %error, "request failed");
                    internal_error()
                }
            },
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

fn internal_error() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}
