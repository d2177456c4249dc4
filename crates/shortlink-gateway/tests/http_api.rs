use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use shortlink_core::{LinkDetail, LinkError, ShortCode, ShortenRequest, Shortener, StoreError};
use shortlink_gateway::{App, AppState};
use shortlink_shortener::ShortenerService;
use shortlink_store::InMemoryLinkStore;
use tower::ServiceExt;

const URL: &str = "http://www.example.com";

fn app() -> Router {
    let shortener = ShortenerService::new(InMemoryLinkStore::new());
    App::router(AppState::new(Arc::new(shortener)))
}

/// A shortener whose backend is always down.
struct UnavailableShortener;

fn backend_down() -> LinkError {
    LinkError::Backend(StoreError::Unavailable(
        "redis://10.0.0.1:6379 connection refused".to_string(),
    ))
}

#[async_trait]
impl Shortener for UnavailableShortener {
    async fn shorten(&self, _request: &ShortenRequest) -> Result<ShortCode, LinkError> {
        Err(backend_down())
    }

    async fn unshorten(&self, _code: &str) -> Result<String, LinkError> {
        Err(backend_down())
    }

    async fn shortlink_info(&self, _code: &str) -> Result<LinkDetail, LinkError> {
        Err(backend_down())
    }

    async fn ping(&self) -> Result<(), LinkError> {
        Err(backend_down())
    }
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn shorten_request(body: &str) -> Request<Body> {
    Request::post("/api/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn shorten(app: &Router, url: &str, minutes: i64) -> String {
    let body = serde_json::json!({ "url": url, "expiration_in_minutes": minutes }).to_string();
    let response = send(app, shorten_request(&body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    json_body(response).await["shortlink"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn shorten_returns_created_code() {
    let app = app();

    let code = shorten(&app, URL, 5).await;
    assert!(ShortCode::parse(code).is_ok());
}

#[tokio::test]
async fn shorten_same_url_twice_returns_same_code() {
    let app = app();

    let first = shorten(&app, URL, 5).await;
    let second = shorten(&app, URL, 5).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn shorten_rejects_malformed_body() {
    let app = app();

    for body in [
        "not json",
        r#"{"url": "http://www.example.com"}"#,
        r#"{"url": "", "expiration_in_minutes": 5}"#,
        r#"{"url": "http://www.example.com", "expiration_in_minutes": 0}"#,
        r#"{"url": "http://www.example.com", "expiration_in_minutes": -1}"#,
    ] {
        let response = send(&app, shorten_request(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn info_returns_detail() {
    let app = app();
    let code = shorten(&app, URL, 5).await;

    let response = send(&app, get(&format!("/api/info?shortlink={code}"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let detail = json_body(response).await;
    assert_eq!(detail["url"], URL);
    assert_eq!(detail["expiration_in_minutes"], 5);
    assert!(!detail["created_at"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn info_unknown_code_is_not_found() {
    let app = app();

    for uri in ["/api/info?shortlink=doesNotExist", "/api/info?shortlink=abc", "/api/info"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {uri}");
        assert_eq!(json_body(response).await["error"], "unknown short URL");
    }
}

#[tokio::test]
async fn redirect_points_to_original_url() {
    let app = app();
    let code = shorten(&app, URL, 5).await;

    let response = send(&app, get(&format!("/{code}"))).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], URL);
}

#[tokio::test]
async fn redirect_unknown_code_is_not_found() {
    let app = app();

    for uri in ["/abc", "/doesNotExist", "/not-a-code"] {
        let response = send(&app, get(uri)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {uri}");
    }
}

#[tokio::test]
async fn backend_failure_is_a_generic_500() {
    let app = App::router(AppState::new(Arc::new(UnavailableShortener)));

    let body = serde_json::json!({ "url": URL, "expiration_in_minutes": 5 }).to_string();
    for request in [
        shorten_request(&body),
        get("/api/info?shortlink=abc"),
        get("/abc"),
    ] {
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = json_body(response).await;
        assert_eq!(body["error"], "internal server error");
        assert!(!body.to_string().contains("redis"));
    }
}

#[tokio::test]
async fn health_reports_store_state() {
    let response = send(&app(), get("/api/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");

    let down = App::router(AppState::new(Arc::new(UnavailableShortener)));
    let response = send(&down, get("/api/health")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
