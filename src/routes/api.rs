// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Location listing and detail routes.

use crate::error::{AppError, Result};
use crate::models::location::{Category, Location, Status};
use crate::store::locations::LocationQuery;
use crate::store::{PaginatedDocs, SortOrder};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

const MAX_PER_PAGE: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/locations", get(get_locations))
        .route("/api/locations/{id}", get(get_location))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LocationsParams {
    /// Filter by category (kebab-case wire name)
    pub category: Option<Category>,
    /// Filter by status
    pub status: Option<Status>,
    /// Case-insensitive text search
    #[validate(length(max = 100))]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    50
}

impl LocationsParams {
    /// Map the validated request onto a store query, honoring the
    /// configured capability flags: disabled filters are ignored.
    pub fn into_query(self, state: &AppState) -> Result<LocationQuery> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if self.page == 0 {
            return Err(AppError::BadRequest(
                "'page' must be 1 or greater".to_string(),
            ));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(AppError::BadRequest(format!(
                "'per_page' must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }

        let caps = state.capabilities;
        Ok(LocationQuery {
            category: self.category.filter(|_| caps.filter_by_category),
            status: self.status.filter(|_| caps.filter_by_status),
            search: self.search.filter(|_| caps.text_search),
            sort: self.sort,
            page: self.page,
            per_page: self.per_page,
        })
    }
}

/// Paginated location listing with the sidebar's filters and sort orders.
async fn get_locations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LocationsParams>,
) -> Result<Json<PaginatedDocs<Location>>> {
    let query = params.into_query(&state)?;
    Ok(Json(state.store.query(&query)))
}

/// Single location by id.
async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Location>> {
    state
        .store
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
}
