// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Derived cluster primitives handed to the rendering surface.
//!
//! Cluster nodes are ephemeral: they are recomputed on every viewport
//! change and never persisted.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One renderable marker primitive: either an aggregated cluster or a
/// single location resolved at the current zoom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ClusterNode {
    #[serde(rename_all = "camelCase")]
    Cluster {
        id: String,
        /// Anchor coordinate (mean of member coordinates)
        longitude: f64,
        latitude: f64,
        count: u32,
        member_ids: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    Single {
        id: String,
        longitude: f64,
        latitude: f64,
        location_id: String,
    },
}

impl ClusterNode {
    pub fn id(&self) -> &str {
        match self {
            ClusterNode::Cluster { id, .. } | ClusterNode::Single { id, .. } => id,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        match self {
            ClusterNode::Cluster {
                longitude, latitude, ..
            }
            | ClusterNode::Single {
                longitude, latitude, ..
            } => (*longitude, *latitude),
        }
    }

    /// Number of locations represented by this node.
    pub fn count(&self) -> u32 {
        match self {
            ClusterNode::Cluster { count, .. } => *count,
            ClusterNode::Single { .. } => 1,
        }
    }
}
