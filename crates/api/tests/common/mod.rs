//! Shared helpers for API integration tests.
//!
//! Builds the full application router with the same middleware stack as
//! production (`build_app_router`), backed by a per-test database and a
//! temporary media root.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use mediatheque_api::auth::jwt::{generate_access_token, JwtConfig};
use mediatheque_api::config::ServerConfig;
use mediatheque_api::engine::ThumbnailEngine;
use mediatheque_api::router::build_app_router;
use mediatheque_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults and the given media root.
pub fn test_config(media_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        media_root: media_root.to_path_buf(),
        public_base_url: "http://localhost:3000".to_string(),
        thumbnail_workers: 2,
        source_fetch_timeout_secs: 5,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router against the given pool and media root.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool, media_root: &Path) -> Router {
    let config = test_config(media_root);
    let engine = ThumbnailEngine::new(pool.clone(), &config);

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        engine,
    };

    build_app_router(state, &config)
}

/// Mint a bearer token for the given user.
pub fn mint_token(user_id: i64, role: &str) -> String {
    let config = JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 15,
    };
    generate_access_token(user_id, role, &config).unwrap()
}

/// Send a request with an optional bearer token and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

/// GET without authentication.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    send(app, Method::GET, path, None, None).await
}

/// GET with a bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, path, Some(token), None).await
}

/// POST with a bearer token and optional JSON body.
pub async fn post_auth(
    app: Router,
    path: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    send(app, Method::POST, path, Some(token), body).await
}

/// DELETE with a bearer token.
pub async fn delete_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, path, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and return the JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
