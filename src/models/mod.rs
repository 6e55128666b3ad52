// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Data models for the application.

pub mod cluster;
pub mod location;
pub mod view_state;

pub use cluster::ClusterNode;
pub use location::{Category, Coordinates, Location, Status};
pub use view_state::ViewState;
