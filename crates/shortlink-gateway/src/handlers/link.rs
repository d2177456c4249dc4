use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortlink_core::{LinkDetail, ShortenRequest};
use tracing::info;

use crate::error::{AppError, Result};
use crate::model::{InfoQuery, ShortenRequestBody, ShortlinkResponse};
use crate::state::AppState;

pub async fn shorten_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<ShortenRequestBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortlinkResponse>)> {
    let Json(body) =
        body.map_err(|e| AppError::BadRequest(format!("parse parameters failed: {}", e.body_text())))?;

    if body.url.is_empty() || body.expiration_in_minutes <= 0 {
        return Err(AppError::BadRequest(
            "validate parameters failed: url and a positive expiration_in_minutes are required"
                .to_string(),
        ));
    }

    let request = ShortenRequest::new(body.url, body.expiration_in_minutes);
    let code = state.shortener().shorten(&request).await?;
    info!(shortlink = %code, "shortened url");

    Ok((
        StatusCode::CREATED,
        Json(ShortlinkResponse {
            shortlink: code.to_string(),
        }),
    ))
}

pub async fn info_handler(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Result<Json<LinkDetail>> {
    let detail = state.shortener().shortlink_info(&query.shortlink).await?;
    Ok(Json(detail))
}

pub async fn redirect_handler(
    Path(shortlink): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let url = state.shortener().unshorten(&shortlink).await?;
    let location =
        HeaderValue::from_str(&url).map_err(|_| AppError::InvalidLocation(url.clone()))?;

    Ok((
        StatusCode::TEMPORARY_REDIRECT,
        [(header::LOCATION, location)],
        Json(url),
    )
        .into_response())
}
