// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

use std::sync::Arc;
use wildmap::config::Config;
use wildmap::routes::create_router;
use wildmap::services::MapCapabilities;
use wildmap::store::LocationStore;
use wildmap::AppState;

/// Load the real shipped dataset.
#[allow(dead_code)]
pub fn test_store() -> LocationStore {
    LocationStore::load_from_file("data/locations.json")
        .expect("Failed to load locations - is data/ committed?")
}

/// Create a test app over the shipped dataset with all capabilities on.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(MapCapabilities {
        filter_by_category: true,
        filter_by_status: true,
        text_search: true,
        draw_tool: true,
    })
}

/// Create a test app with explicit capability flags.
#[allow(dead_code)]
pub fn create_test_app_with(capabilities: MapCapabilities) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::test_default(),
        test_store(),
        capabilities,
    ));
    (create_router(state.clone()), state)
}

/// Fetch a GET path and decode the JSON body.
#[allow(dead_code)]
pub async fn get_json(
    app: axum::Router,
    uri: &str,
) -> (axum::http::StatusCode, serde_json::Value) {
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    // Framework-level rejections (e.g. query deserialization) come back as
    // plain text; surface those as a JSON string so callers can still
    // assert on the status.
    let json = serde_json::from_slice(&body)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&body).into_owned()));
    (status, json)
}
