// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Addressable map view state and its URL query-parameter wire format.
//!
//! The frontend keeps the viewport, selection, and active overlay sets in
//! the page URL so map views are shareable. This module owns the canonical
//! encoding: parsing a query string reproduces the same state, and encoding
//! a state reproduces a parseable query string.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Default viewport centered on South Africa.
pub const DEFAULT_LONGITUDE: f64 = 24.7499;
pub const DEFAULT_LATITUDE: f64 = -28.7282;
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Shareable map state carried in URL query parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    /// At most one selected record; empty string means no selection
    pub selected_location_id: String,
    /// Location ids with their marker toggled active (order irrelevant)
    pub marker_ids: BTreeSet<String>,
    /// Location ids with their polygon overlay toggled active
    pub polygon_ids: BTreeSet<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            longitude: DEFAULT_LONGITUDE,
            latitude: DEFAULT_LATITUDE,
            zoom: DEFAULT_ZOOM,
            selected_location_id: String::new(),
            marker_ids: BTreeSet::new(),
            polygon_ids: BTreeSet::new(),
        }
    }
}

impl ViewState {
    /// Parse a URL query string (without leading '?') into a ViewState.
    ///
    /// Unknown keys are ignored; unparseable values fall back to their
    /// defaults, matching the frontend parser's leniency.
    pub fn parse_query(query: &str) -> Self {
        let mut state = Self::default();

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = match pair.split_once('=') {
                Some((k, v)) => (k, v),
                None => (pair, ""),
            };
            // Id lists are split on their unencoded separator before each
            // element is decoded, so ids containing commas survive.
            if key == "markers" {
                state.marker_ids = parse_id_list(raw);
                continue;
            }
            if key == "polygons" {
                state.polygon_ids = parse_id_list(raw);
                continue;
            }

            let value = match urlencoding::decode(raw) {
                Ok(v) => v.into_owned(),
                Err(_) => {
                    tracing::warn!(key, "Undecodable query value, using default");
                    continue;
                }
            };

            match key {
                "longitude" => {
                    if let Ok(v) = value.parse() {
                        state.longitude = v;
                    }
                }
                "latitude" => {
                    if let Ok(v) = value.parse() {
                        state.latitude = v;
                    }
                }
                "zoom" => {
                    if let Ok(v) = value.parse() {
                        state.zoom = v;
                    }
                }
                "selectedLocationId" => state.selected_location_id = value,
                _ => {}
            }
        }

        state
    }

    /// Encode this state as a canonical query string (without leading '?').
    ///
    /// Parameters equal to their defaults are omitted, so a default state
    /// encodes to an empty string. Sets are emitted in sorted order.
    pub fn to_query(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !self.marker_ids.is_empty() {
            parts.push(format!("markers={}", encode_id_list(&self.marker_ids)));
        }
        if !self.polygon_ids.is_empty() {
            parts.push(format!("polygons={}", encode_id_list(&self.polygon_ids)));
        }
        if self.longitude != DEFAULT_LONGITUDE {
            parts.push(format!("longitude={}", self.longitude));
        }
        if self.latitude != DEFAULT_LATITUDE {
            parts.push(format!("latitude={}", self.latitude));
        }
        if self.zoom != DEFAULT_ZOOM {
            parts.push(format!("zoom={}", self.zoom));
        }
        if !self.selected_location_id.is_empty() {
            parts.push(format!(
                "selectedLocationId={}",
                urlencoding::encode(&self.selected_location_id)
            ));
        }

        parts.join("&")
    }
}

fn parse_id_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| urlencoding::decode(s).ok())
        .map(|s| s.into_owned())
        .collect()
}

fn encode_id_list(ids: &BTreeSet<String>) -> String {
    ids.iter()
        .map(|id| urlencoding::encode(id).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}
