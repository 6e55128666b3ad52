// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Coordinate projection from stored records to renderable geometry.
//!
//! The CMS stores a point coordinate per location and, optionally, an area
//! boundary as an array of single-coordinate entries. This module flattens
//! that shape into `geo` primitives in canonical (longitude, latitude)
//! order. Known bad data (the historical axis-swap in some stored rings) is
//! rejected at ingestion with a warning, never silently corrected.

use crate::models::location::{Coordinates, Location};
use geo::{Coord, LineString, Point, Polygon};

/// Project a location's point coordinate.
///
/// Returns `None` (with a warning) for non-finite or out-of-range values so
/// one broken record never takes down a render batch.
pub fn project(location: &Location) -> Option<Point<f64>> {
    let c = location.coordinates;
    if !is_valid_pair(c) {
        tracing::warn!(
            id = %location.id,
            latitude = c.latitude,
            longitude = c.longitude,
            "Skipping location with invalid point coordinate"
        );
        return None;
    }
    Some(Point::new(c.longitude, c.latitude))
}

/// Project a location's area boundary into a closed polygon ring.
///
/// Returns `None` when the record has no polygon, when fewer than 3 valid
/// vertices remain, or when any vertex exhibits the known axis-swap defect
/// (invalid as stored, valid with latitude/longitude exchanged). The ring is
/// closed if the source left it open.
pub fn project_ring(location: &Location) -> Option<Polygon<f64>> {
    if location.polygon.is_empty() {
        return None;
    }

    let mut ring: Vec<Coord<f64>> = Vec::with_capacity(location.polygon.len() + 1);
    for entry in &location.polygon {
        // Each entry wraps exactly one coordinate pair by construction;
        // read the first and ignore any extras.
        let Some(&pair) = entry.coordinates.first() else {
            tracing::warn!(id = %location.id, "Skipping empty polygon entry");
            continue;
        };

        if !is_valid_pair(pair) {
            if looks_axis_swapped(pair) {
                tracing::warn!(
                    id = %location.id,
                    latitude = pair.latitude,
                    longitude = pair.longitude,
                    "Rejecting polygon with swapped axis order; fix the stored record"
                );
                return None;
            }
            tracing::warn!(
                id = %location.id,
                latitude = pair.latitude,
                longitude = pair.longitude,
                "Skipping invalid polygon vertex"
            );
            continue;
        }

        ring.push(Coord {
            x: pair.longitude,
            y: pair.latitude,
        });
    }

    if ring.len() < 3 {
        return None;
    }

    if ring.first() != ring.last() {
        let first = ring[0];
        ring.push(first);
    }

    Some(Polygon::new(LineString::from(ring), vec![]))
}

fn is_valid_pair(c: Coordinates) -> bool {
    c.latitude.is_finite()
        && c.longitude.is_finite()
        && c.latitude.abs() <= 90.0
        && c.longitude.abs() <= 180.0
}

/// A pair that is invalid as stored but valid when the axes are exchanged
/// is almost certainly the known latitude/longitude swap defect.
fn looks_axis_swapped(c: Coordinates) -> bool {
    let swapped = Coordinates {
        latitude: c.longitude,
        longitude: c.latitude,
    };
    !is_valid_pair(c) && is_valid_pair(swapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::{Category, PolygonEntry, Status};

    fn location_with_ring(ring: &[(f64, f64)]) -> Location {
        Location {
            id: "test".to_string(),
            title: "Test".to_string(),
            location_name: "Test".to_string(),
            description: "d".to_string(),
            category: Category::Other,
            status: Status::Active,
            coordinates: Coordinates {
                latitude: -34.0,
                longitude: 18.5,
            },
            polygon: ring
                .iter()
                .map(|&(latitude, longitude)| PolygonEntry {
                    coordinates: vec![Coordinates {
                        latitude,
                        longitude,
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
    fn test_point_projection_emits_lon_lat_order() {
        let loc = location_with_ring(&[]);
        let point = project(&loc).expect("valid point");
        assert_eq!(point.x(), 18.5);
        assert_eq!(point.y(), -34.0);
    }

    #[test]
    fn test_nonfinite_point_is_skipped() {
        let mut loc = location_with_ring(&[]);
        loc.coordinates.latitude = f64::NAN;
        assert!(project(&loc).is_none());
    }

    #[test]
    fn test_two_vertex_ring_yields_none() {
        let loc = location_with_ring(&[(-34.0, 18.4), (-34.1, 18.5)]);
        assert!(project_ring(&loc).is_none());
    }

    #[test]
    fn test_open_ring_is_closed() {
        let loc = location_with_ring(&[(-34.0, 18.4), (-34.1, 18.5), (-34.2, 18.3)]);
        let polygon = project_ring(&loc).expect("valid ring");
        let exterior = polygon.exterior();
        assert_eq!(exterior.0.len(), 4);
        assert_eq!(exterior.0.first(), exterior.0.last());
        // lon/lat order on the way out
        assert_eq!(exterior.0[0], Coord { x: 18.4, y: -34.0 });
    }

    #[test]
    fn test_axis_swapped_ring_is_rejected() {
        // Stored latitude 150.0 is out of range but valid as a longitude:
        // the known swap defect. Must reject, not swap.
        let loc = location_with_ring(&[(150.0, -34.0), (151.0, -34.1), (152.0, -34.2)]);
        assert!(project_ring(&loc).is_none());
    }
}
