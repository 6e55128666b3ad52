// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Pointer-event routing: hit-testing, hover, selection, cluster fly-to.
//!
//! Hover and selection are independent axes: a location can be hovered and
//! selected at the same time. Cluster clicks are a side channel that only
//! moves the camera and never touches the selection.

use crate::models::location::Location;
use crate::models::ClusterNode;
use crate::services::clusterer::{world_pixel, ClusterPoint, Clusterer};
use crate::services::projector;
use crate::services::sync::ViewStateSync;
use geo::{Contains, Point};
use serde::{Deserialize, Serialize};

/// Independent, composable map capabilities. One consolidated component
/// gated by flags instead of divergent near-copies of the same view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapCapabilities {
    pub filter_by_category: bool,
    pub filter_by_status: bool,
    pub text_search: bool,
    pub draw_tool: bool,
}

impl Default for MapCapabilities {
    fn default() -> Self {
        Self {
            filter_by_category: true,
            filter_by_status: true,
            text_search: true,
            draw_tool: false,
        }
    }
}

/// What the pointer is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Feature(String),
    Cluster(String),
    Empty,
}

/// Pointer events emitted by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerEvent {
    Click(PointerTarget),
    Move(PointerTarget),
}

/// Camera side effect requested by an interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FlyTo {
        longitude: f64,
        latitude: f64,
        zoom: f64,
    },
}

/// The rendered frame an event is dispatched against.
pub struct MapSnapshot<'a> {
    pub clusters: &'a [ClusterNode],
    pub points: &'a [ClusterPoint],
    /// Zoom at which `clusters` was computed
    pub zoom: f64,
}

/// Routes pointer events to state transitions.
#[derive(Debug, Default)]
pub struct InteractionDispatcher {
    capabilities: MapCapabilities,
    hovered: Option<String>,
}

impl InteractionDispatcher {
    pub fn new(capabilities: MapCapabilities) -> Self {
        Self {
            capabilities,
            hovered: None,
        }
    }

    pub fn capabilities(&self) -> MapCapabilities {
        self.capabilities
    }

    /// Currently hovered feature id, independent of selection.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Apply a pointer event against the rendered frame.
    ///
    /// Failures are contained: an unknown cluster id logs a diagnostic and
    /// yields no camera movement, never an error.
    pub fn dispatch(
        &mut self,
        event: PointerEvent,
        snapshot: &MapSnapshot,
        clusterer: &Clusterer,
        sync: &mut ViewStateSync,
    ) -> Effect {
        match event {
            PointerEvent::Move(PointerTarget::Feature(id)) => {
                self.hovered = Some(id);
                Effect::None
            }
            PointerEvent::Move(_) => {
                self.hovered = None;
                Effect::None
            }
            PointerEvent::Click(PointerTarget::Empty) => {
                sync.clear_selection();
                Effect::None
            }
            PointerEvent::Click(PointerTarget::Feature(id)) => {
                // Selection moves when a different feature is clicked;
                // clicking the selected feature toggles it off.
                let selected = sync.state().selected_location_id.clone();
                if !selected.is_empty() && selected != id {
                    sync.toggle_location(&selected);
                }
                sync.toggle_location(&id);
                Effect::None
            }
            PointerEvent::Click(PointerTarget::Cluster(id)) => self.fly_to_cluster(&id, snapshot, clusterer),
        }
    }

    fn fly_to_cluster(
        &self,
        cluster_id: &str,
        snapshot: &MapSnapshot,
        clusterer: &Clusterer,
    ) -> Effect {
        let Some(node) = snapshot.clusters.iter().find(|n| n.id() == cluster_id) else {
            tracing::warn!(cluster_id, "Cluster expansion lookup failed: unknown id");
            return Effect::None;
        };

        match node {
            ClusterNode::Single {
                longitude,
                latitude,
                ..
            } => {
                // Already resolved; a fly-to at the current zoom is a no-op
                // camera-wise but keeps the contract uniform.
                Effect::FlyTo {
                    longitude: *longitude,
                    latitude: *latitude,
                    zoom: snapshot.zoom,
                }
            }
            ClusterNode::Cluster {
                longitude,
                latitude,
                member_ids,
                ..
            } => {
                let members: Vec<ClusterPoint> = snapshot
                    .points
                    .iter()
                    .filter(|p| member_ids.contains(&p.id))
                    .cloned()
                    .collect();
                let zoom = clusterer.expansion_zoom(&members, snapshot.zoom);
                Effect::FlyTo {
                    longitude: *longitude,
                    latitude: *latitude,
                    zoom,
                }
            }
        }
    }
}

/// Resolve a pointer position to a target.
///
/// Explicit polygon hit-testing takes precedence over marker proximity when
/// both are stacked under the pointer; marker hits use a screen-pixel
/// radius at the current zoom.
pub fn hit_test(
    locations: &[&Location],
    longitude: f64,
    latitude: f64,
    zoom: f64,
    marker_radius_px: f64,
) -> PointerTarget {
    let pointer = Point::new(longitude, latitude);

    for location in locations {
        if let Some(polygon) = projector::project_ring(location) {
            if polygon.contains(&pointer) {
                return PointerTarget::Feature(location.id.clone());
            }
        }
    }

    let (px, py) = world_pixel(longitude, latitude, zoom);
    let mut best: Option<(f64, &Location)> = None;
    for location in locations {
        let Some(point) = projector::project(location) else {
            continue;
        };
        let (qx, qy) = world_pixel(point.x(), point.y(), zoom);
        let dist = (qx - px).hypot(qy - py);
        if dist <= marker_radius_px && best.is_none_or(|(b, _)| dist < b) {
            best = Some((dist, location));
        }
    }

    match best {
        Some((_, location)) => PointerTarget::Feature(location.id.clone()),
        None => PointerTarget::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::{Category, Coordinates, PolygonEntry, Status};
    use crate::models::ViewState;
    use std::time::Duration;

    fn sync() -> ViewStateSync {
        ViewStateSync::new(ViewState::default(), Duration::from_millis(500))
    }

    fn empty_snapshot<'a>() -> MapSnapshot<'a> {
        MapSnapshot {
            clusters: &[],
            points: &[],
            zoom: 5.0,
        }
    }

    fn location(id: &str, latitude: f64, longitude: f64, ring: &[(f64, f64)]) -> Location {
        Location {
            id: id.to_string(),
            title: id.to_string(),
            location_name: id.to_string(),
            description: "d".to_string(),
            category: Category::Other,
            status: Status::Active,
            coordinates: Coordinates {
                latitude,
                longitude,
            },
            polygon: ring
                .iter()
                .map(|&(lat, lon)| PolygonEntry {
                    coordinates: vec![Coordinates {
                        latitude: lat,
                        longitude: lon,
                    }],
                })
                .collect(),
            tags: vec![],
            contact_info: None,
            additional_info: None,
            published_at: None,
            slug: None,
        }
    }

    #[test]
    fn test_click_feature_selects_then_click_empty_clears() {
        let mut dispatcher = InteractionDispatcher::default();
        let mut s = sync();
        let clusterer = Clusterer::default();
        let snapshot = empty_snapshot();

        dispatcher.dispatch(
            PointerEvent::Click(PointerTarget::Feature("loc-a".to_string())),
            &snapshot,
            &clusterer,
            &mut s,
        );
        assert_eq!(s.state().selected_location_id, "loc-a");

        dispatcher.dispatch(
            PointerEvent::Click(PointerTarget::Empty),
            &snapshot,
            &clusterer,
            &mut s,
        );
        assert!(s.state().selected_location_id.is_empty());
    }

    #[test]
    fn test_selection_moves_to_other_feature() {
        let mut dispatcher = InteractionDispatcher::default();
        let mut s = sync();
        let clusterer = Clusterer::default();
        let snapshot = empty_snapshot();

        for id in ["loc-a", "loc-b"] {
            dispatcher.dispatch(
                PointerEvent::Click(PointerTarget::Feature(id.to_string())),
                &snapshot,
                &clusterer,
                &mut s,
            );
        }
        assert_eq!(s.state().selected_location_id, "loc-b");
        assert!(!s.state().marker_ids.contains("loc-a"));
    }

    #[test]
    fn test_hover_is_independent_of_selection() {
        let mut dispatcher = InteractionDispatcher::default();
        let mut s = sync();
        let clusterer = Clusterer::default();
        let snapshot = empty_snapshot();

        dispatcher.dispatch(
            PointerEvent::Click(PointerTarget::Feature("loc-a".to_string())),
            &snapshot,
            &clusterer,
            &mut s,
        );
        dispatcher.dispatch(
            PointerEvent::Move(PointerTarget::Feature("loc-a".to_string())),
            &snapshot,
            &clusterer,
            &mut s,
        );
        assert_eq!(dispatcher.hovered(), Some("loc-a"));
        assert_eq!(s.state().selected_location_id, "loc-a");

        dispatcher.dispatch(
            PointerEvent::Move(PointerTarget::Empty),
            &snapshot,
            &clusterer,
            &mut s,
        );
        assert_eq!(dispatcher.hovered(), None);
        assert_eq!(s.state().selected_location_id, "loc-a");
    }

    #[test]
    fn test_cluster_click_flies_without_selecting() {
        let mut dispatcher = InteractionDispatcher::default();
        let mut s = sync();
        let clusterer = Clusterer::new(50.0, 14.0);

        let points = vec![
            ClusterPoint {
                id: "a".to_string(),
                longitude: 18.4241,
                latitude: -33.9249,
            },
            ClusterPoint {
                id: "b".to_string(),
                longitude: 18.4241,
                latitude: -33.92485,
            },
        ];
        let clusters = clusterer.cluster(&points, &crate::services::clusterer::world_bounds(), 5.0);
        let snapshot = MapSnapshot {
            clusters: &clusters,
            points: &points,
            zoom: 5.0,
        };

        let effect = dispatcher.dispatch(
            PointerEvent::Click(PointerTarget::Cluster(clusters[0].id().to_string())),
            &snapshot,
            &clusterer,
            &mut s,
        );
        match effect {
            Effect::FlyTo { zoom, .. } => assert!(zoom > 5.0),
            Effect::None => panic!("cluster click must fly"),
        }
        assert!(s.state().selected_location_id.is_empty());
    }

    #[test]
    fn test_unknown_cluster_id_is_a_noop() {
        let mut dispatcher = InteractionDispatcher::default();
        let mut s = sync();
        let clusterer = Clusterer::default();
        let snapshot = empty_snapshot();

        let effect = dispatcher.dispatch(
            PointerEvent::Click(PointerTarget::Cluster("nope".to_string())),
            &snapshot,
            &clusterer,
            &mut s,
        );
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_polygon_takes_precedence_over_stacked_marker() {
        // Marker of `marker-loc` sits inside the polygon of `area-loc`.
        let area = location(
            "area-loc",
            -34.0,
            18.0,
            &[(-33.9, 18.3), (-33.9, 18.6), (-34.1, 18.6), (-34.1, 18.3)],
        );
        let marker = location("marker-loc", -34.0, 18.45, &[]);
        let locations = vec![&area, &marker];

        let target = hit_test(&locations, 18.45, -34.0, 10.0, 20.0);
        assert_eq!(target, PointerTarget::Feature("area-loc".to_string()));
    }

    #[test]
    fn test_hit_test_falls_back_to_marker_then_empty() {
        let marker = location("marker-loc", -34.0, 18.45, &[]);
        let locations = vec![&marker];

        let on_marker = hit_test(&locations, 18.45, -34.0, 10.0, 20.0);
        assert_eq!(on_marker, PointerTarget::Feature("marker-loc".to_string()));

        let far_away = hit_test(&locations, 25.0, -29.0, 10.0, 20.0);
        assert_eq!(far_away, PointerTarget::Empty);
    }
}
