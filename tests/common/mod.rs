// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use std::sync::Arc;
use tower::ServiceExt;
use workout_tracker::config::Config;
use workout_tracker::db::MemoryStore;
use workout_tracker::routes::create_router;
use workout_tracker::AppState;

/// Create a test app over an in-memory store.
/// Returns the router, the shared state and the store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(Config::default(), store.clone()));
    (create_router(state.clone()), state, store)
}

/// Send a JSON POST through the router.
#[allow(dead_code)]
pub async fn post_json(app: &axum::Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Send a GET through the router.
#[allow(dead_code)]
pub async fn get(app: &axum::Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
