//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack (CORS, request ID, timeout, rate limiting, panic
//! recovery) that production uses. Each test gets its own session store
//! seeded with one known token.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use planhaus_api::config::ServerConfig;
use planhaus_api::middleware::rate_limit::RateLimiter;
use planhaus_api::router::build_app_router;
use planhaus_api::sessions::SessionStore;
use planhaus_api::state::AppState;

/// The session token every test request authenticates with.
pub const TEST_TOKEN: &str = "test-session-token";

/// The user id behind [`TEST_TOKEN`].
pub const TEST_USER_ID: i64 = 1;

/// Build a test `ServerConfig` with safe defaults.
///
/// The rate limit is high enough that no test trips it by accident; the
/// dedicated rate-limit test builds its own tighter config.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        rate_limit_per_window: 10_000,
        rate_limit_window_secs: 60,
        session_ttl_secs: 3600,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and config.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session_ttl_secs,
    )));
    sessions.insert(TEST_TOKEN.to_string(), TEST_USER_ID);

    let rate_limiter = Arc::new(RateLimiter::new(
        config.rate_limit_per_window,
        Duration::from_secs(config.rate_limit_window_secs),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions,
        rate_limiter,
    };

    build_app_router(state, &config)
}

/// Build the test app with the default test config.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Send a request with the test bearer token and an optional JSON body.
pub async fn authed_request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {TEST_TOKEN}"));
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a request with no Authorization header.
pub async fn anon_request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    authed_request(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    authed_request(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    authed_request(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    authed_request(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    authed_request(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    authed_request(app, Method::DELETE, uri, None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a project via the API and return its id.
pub async fn create_project(app: &Router, name: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/projects",
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
