// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Map primitive routes: cluster sets, GeoJSON sources, view state.

use crate::error::{AppError, Result};
use crate::models::location::{Category, Status};
use crate::models::{ClusterNode, ViewState};
use crate::services::clusterer::{world_bounds, ClusterPoint, MAX_ZOOM};
use crate::services::sources::{self, MapSources};
use crate::services::styler::StyleContext;
use crate::services::projector;
use crate::store::locations::LocationQuery;
use crate::AppState;
use axum::{
    extract::{Path, Query, RawQuery, State},
    routing::get,
    Json, Router,
};
use geo::Rect;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/map/clusters", get(get_clusters))
        .route("/api/map/clusters/{id}/expansion", get(get_expansion))
        .route("/api/map/sources", get(get_sources))
        .route("/api/map/state", get(get_state))
}

/// Viewport + filter parameters shared by the cluster endpoints.
#[derive(Debug, Deserialize)]
pub struct ViewportParams {
    pub west: Option<f64>,
    pub south: Option<f64>,
    pub east: Option<f64>,
    pub north: Option<f64>,
    pub zoom: f64,
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub search: Option<String>,
}

impl ViewportParams {
    /// Viewport rect, or the whole-world fallback when the client has not
    /// seen a viewport-ready event yet (pre-load bounds are undefined).
    fn bounds(&self) -> Result<Rect<f64>> {
        match (self.west, self.south, self.east, self.north) {
            (Some(w), Some(s), Some(e), Some(n)) => {
                if [w, s, e, n].iter().any(|v| !v.is_finite()) {
                    return Err(AppError::BadRequest(
                        "Viewport bounds must be finite".to_string(),
                    ));
                }
                if s.abs() > 90.0 || n.abs() > 90.0 || w.abs() > 180.0 || e.abs() > 180.0 {
                    return Err(AppError::BadRequest(
                        "Viewport bounds out of range".to_string(),
                    ));
                }
                Ok(Rect::new(
                    geo::coord! { x: w, y: s },
                    geo::coord! { x: e, y: n },
                ))
            }
            (None, None, None, None) => Ok(world_bounds()),
            _ => Err(AppError::BadRequest(
                "Viewport bounds require all of west, south, east, north".to_string(),
            )),
        }
    }

    fn zoom(&self) -> Result<f64> {
        if !self.zoom.is_finite() || self.zoom < 0.0 || self.zoom > MAX_ZOOM {
            return Err(AppError::BadRequest(format!(
                "'zoom' must be between 0 and {}",
                MAX_ZOOM
            )));
        }
        Ok(self.zoom)
    }

    fn filter_query(&self, state: &AppState) -> LocationQuery {
        let caps = state.capabilities;
        LocationQuery {
            category: self.category.filter(|_| caps.filter_by_category),
            status: self.status.filter(|_| caps.filter_by_status),
            search: self.search.clone().filter(|_| caps.text_search),
            ..Default::default()
        }
    }
}

/// Project the filtered dataset into clusterable points.
fn cluster_points(state: &AppState, query: &LocationQuery) -> Vec<ClusterPoint> {
    state
        .store
        .filter(query)
        .into_iter()
        .filter_map(|location| {
            let point = projector::project(location)?;
            Some(ClusterPoint {
                id: location.id.clone(),
                longitude: point.x(),
                latitude: point.y(),
            })
        })
        .collect()
}

/// Cluster set for the current viewport.
async fn get_clusters(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewportParams>,
) -> Result<Json<Vec<ClusterNode>>> {
    let bounds = params.bounds()?;
    let zoom = params.zoom()?;
    let points = cluster_points(&state, &params.filter_query(&state));

    let nodes = state
        .clusterer
        .cluster(state.store.generation(), &points, &bounds, zoom);
    Ok(Json(nodes))
}

/// Fly-to target for an activated cluster.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlyToResponse {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

/// Expansion zoom for a cluster id, recomputed deterministically from the
/// same viewport the cluster set came from. Unknown ids are a 404 the
/// client answers with no camera movement.
async fn get_expansion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<ViewportParams>,
) -> Result<Json<FlyToResponse>> {
    let bounds = params.bounds()?;
    let zoom = params.zoom()?;
    let points = cluster_points(&state, &params.filter_query(&state));

    let nodes = state
        .clusterer
        .cluster(state.store.generation(), &points, &bounds, zoom);

    let Some(node) = nodes.iter().find(|n| n.id() == id) else {
        tracing::warn!(cluster_id = %id, "Cluster expansion lookup failed: unknown id");
        return Err(AppError::NotFound(format!("Cluster {} not found", id)));
    };

    let (longitude, latitude) = node.position();
    let target_zoom = match node {
        ClusterNode::Single { .. } => zoom,
        ClusterNode::Cluster { member_ids, .. } => {
            let members: Vec<ClusterPoint> = points
                .into_iter()
                .filter(|p| member_ids.contains(&p.id))
                .collect();
            state.clusterer.clusterer().expansion_zoom(&members, zoom)
        }
    };

    Ok(Json(FlyToResponse {
        longitude,
        latitude,
        zoom: target_zoom,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SourcesParams {
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub search: Option<String>,
    /// Currently selected location id (paint priority)
    pub selected: Option<String>,
    /// Currently hovered location id
    pub hovered: Option<String>,
}

/// Named GeoJSON sources plus paint-layer descriptors.
async fn get_sources(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SourcesParams>,
) -> Result<Json<MapSources>> {
    let caps = state.capabilities;
    let query = LocationQuery {
        category: params.category.filter(|_| caps.filter_by_category),
        status: params.status.filter(|_| caps.filter_by_status),
        search: params.search.filter(|_| caps.text_search),
        ..Default::default()
    };

    let locations = state.store.filter(&query);
    let ctx = StyleContext {
        selected_id: params.selected.as_deref(),
        hovered_id: params.hovered.as_deref(),
    };

    Ok(Json(sources::build(&locations, &ctx)))
}

/// Normalized view state echoed back with its canonical query string.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewStateResponse {
    pub state: ViewState,
    pub query: String,
}

/// Parse whatever view-state parameters the share URL carries and hand
/// back the normalized state plus its canonical encoding.
async fn get_state(RawQuery(raw): RawQuery) -> Json<ViewStateResponse> {
    let state = ViewState::parse_query(raw.as_deref().unwrap_or(""));
    let query = state.to_query();
    Json(ViewStateResponse { state, query })
}
