//! Common test utilities

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use item_catalog::{db::memory_pool, router, AppState, SqlItemStore};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Router over a fresh in-memory database, plus the pool for raw inserts.
pub async fn test_app() -> (Router, SqlitePool) {
    let pool = memory_pool().await.expect("Failed to open in-memory database");
    let state = AppState::new(Arc::new(SqlItemStore::new(pool.clone())));
    (router(state), pool)
}

/// Send one request and decode the JSON response body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_owned())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).expect("Failed to build request"))
        .await
        .expect("Router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = serde_json::from_slice(&bytes).expect("Response body is not JSON");
    (status, json)
}
