// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Wildmap: backend for the Wild Trust conservation location map.
//!
//! Serves catalogued conservation locations (marine protected areas,
//! sanctuaries, research stations, ...) in South Africa and the derived
//! map primitives the frontend renders: clustered markers, styled polygon
//! overlays, and shareable view state.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::{CachedClusterer, Clusterer, MapCapabilities};
use store::LocationStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: LocationStore,
    pub clusterer: CachedClusterer,
    pub capabilities: MapCapabilities,
}

impl AppState {
    pub fn new(config: Config, store: LocationStore, capabilities: MapCapabilities) -> Self {
        let clusterer = CachedClusterer::new(Clusterer::new(
            config.cluster_radius_px,
            config.max_cluster_zoom,
        ));
        Self {
            config,
            store,
            clusterer,
            capabilities,
        }
    }
}
