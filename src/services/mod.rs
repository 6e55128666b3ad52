// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Services module - the map engine.

pub mod clusterer;
pub mod dispatcher;
pub mod draw;
pub mod projector;
pub mod sources;
pub mod styler;
pub mod sync;

pub use clusterer::{CachedClusterer, ClusterPoint, Clusterer};
pub use dispatcher::{InteractionDispatcher, MapCapabilities};
pub use draw::MeasureTool;
pub use sync::{HistoryMode, ViewStateSync};
