// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Wildmap API Server
//!
//! Serves the Wild Trust conservation map: location records, clustered
//! markers, polygon overlays, and shareable view state.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wildmap::{
    config::Config, services::MapCapabilities, store::LocationStore, AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Wildmap API");

    // Load location records
    tracing::info!(path = %config.locations_path, "Loading locations");
    let store =
        LocationStore::load_from_file(&config.locations_path).expect("Failed to load locations");
    tracing::info!(count = store.locations().len(), "Locations loaded");

    // Build shared state
    let port = config.port;
    let state = Arc::new(AppState::new(config, store, MapCapabilities::default()));

    // Build router
    let app = wildmap::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wildmap=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
