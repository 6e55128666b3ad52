// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Location listing API tests: filters, sort, pagination, validation.

use axum::http::StatusCode;
use wildmap::services::MapCapabilities;

mod common;

#[tokio::test]
async fn test_list_locations_default_page() {
    let (app, _state) = common::create_test_app();
    let (status, body) = common::get_json(app, "/api/locations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalDocs"], 12);
    assert_eq!(body["page"], 1);
    assert_eq!(body["docs"].as_array().unwrap().len(), 12);
    assert_eq!(body["hasNextPage"], false);
}

#[tokio::test]
async fn test_filter_by_status_and_category() {
    let (app, _state) = common::create_test_app();
    let (status, body) = common::get_json(
        app.clone(),
        "/api/locations?category=marine-protected-area&status=active",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let docs = body["docs"].as_array().unwrap();
    assert_eq!(docs.len(), 2);
    for doc in docs {
        assert_eq!(doc["category"], "marine-protected-area");
        assert_eq!(doc["status"], "active");
    }

    let (status, body) = common::get_json(app, "/api/locations?status=closed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalDocs"], 1);
    assert_eq!(body["docs"][0]["id"], "old-whaling-station");
}

#[tokio::test]
async fn test_text_search_covers_tags() {
    let (app, _state) = common::create_test_app();
    let (status, body) = common::get_json(app, "/api/locations?search=penguin").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["docs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"boulders-beach"));
    assert!(ids.contains(&"robben-island"));
}

#[tokio::test]
async fn test_sort_a_z() {
    let (app, _state) = common::create_test_app();
    let (status, body) = common::get_json(app, "/api/locations?sort=a-z").await;

    assert_eq!(status, StatusCode::OK);
    let titles: Vec<String> = body["docs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap().to_lowercase())
        .collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}

#[tokio::test]
async fn test_pagination_bounds() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::get_json(app.clone(), "/api/locations?page=2&per_page=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["docs"].as_array().unwrap().len(), 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["hasPrevPage"], true);

    let (status, _) = common::get_json(app.clone(), "/api/locations?per_page=101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::get_json(app, "/api/locations?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_too_long_is_rejected() {
    let (app, _state) = common::create_test_app();
    let long = "a".repeat(101);
    let (status, _) = common::get_json(app, &format!("/api/locations?search={}", long)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_location_by_id_and_404() {
    let (app, _state) = common::create_test_app();

    let (status, body) = common::get_json(app.clone(), "/api/locations/cape-point-mpa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locationName"], "Cape Point");
    assert_eq!(body["coordinates"]["latitude"], -34.3568);

    let (status, body) = common::get_json(app, "/api/locations/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_disabled_capability_ignores_filter() {
    let (app, _state) = common::create_test_app_with(MapCapabilities {
        filter_by_category: true,
        filter_by_status: false,
        text_search: true,
        draw_tool: false,
    });

    // status filter is switched off, so the full set comes back
    let (status, body) = common::get_json(app, "/api/locations?status=closed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalDocs"], 12);
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();
    let (status, body) = common::get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
