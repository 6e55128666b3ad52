// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Named GeoJSON sources and paint-layer descriptors for the rendering
//! surface.
//!
//! The frontend hands these straight to the map engine: one point source
//! for markers/clustering, one polygon source for area overlays, plus the
//! layer descriptors that reference them. Records that fail projection are
//! skipped (the projector already logged why).

use crate::models::location::Location;
use crate::services::projector;
use crate::services::styler::{self, StyleContext};
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde::Serialize;
use serde_json::{json, Map};

pub const POINT_SOURCE: &str = "locations-points";
pub const POLYGON_SOURCE: &str = "locations-polygons";

/// A paint-layer descriptor referencing a named source.
#[derive(Debug, Clone, Serialize)]
pub struct LayerDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    pub source: String,
    pub paint: serde_json::Value,
}

/// Everything the rendering surface needs to draw the location overlay.
#[derive(Debug, Clone, Serialize)]
pub struct MapSources {
    pub points: FeatureCollection,
    pub polygons: FeatureCollection,
    pub layers: Vec<LayerDescriptor>,
}

/// Build sources for the given (already filtered) locations.
pub fn build(locations: &[&Location], ctx: &StyleContext) -> MapSources {
    let points = FeatureCollection {
        bbox: None,
        features: locations
            .iter()
            .filter_map(|l| point_feature(l, ctx))
            .collect(),
        foreign_members: None,
    };

    let polygons = FeatureCollection {
        bbox: None,
        features: locations
            .iter()
            .filter_map(|l| polygon_feature(l, ctx))
            .collect(),
        foreign_members: None,
    };

    MapSources {
        points,
        polygons,
        layers: layers(),
    }
}

fn point_feature(location: &Location, ctx: &StyleContext) -> Option<Feature> {
    let point = projector::project(location)?;

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
        id: Some(geojson::feature::Id::String(location.id.clone())),
        properties: Some(properties(location, ctx)),
        foreign_members: None,
    })
}

fn polygon_feature(location: &Location, ctx: &StyleContext) -> Option<Feature> {
    let polygon = projector::project_ring(location)?;
    let ring: Vec<Vec<f64>> = polygon
        .exterior()
        .coords()
        .map(|c| vec![c.x, c.y])
        .collect();

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: Some(geojson::feature::Id::String(location.id.clone())),
        properties: Some(properties(location, ctx)),
        foreign_members: None,
    })
}

/// Feature properties consumed by data-driven paint expressions.
fn properties(location: &Location, ctx: &StyleContext) -> Map<String, serde_json::Value> {
    let mut map = Map::new();
    map.insert("id".to_string(), json!(location.id));
    map.insert("title".to_string(), json!(location.title));
    map.insert("locationName".to_string(), json!(location.location_name));
    map.insert("category".to_string(), json!(location.category));
    map.insert("status".to_string(), json!(location.status));
    map.insert(
        "fillColor".to_string(),
        json!(styler::fill_color(location, ctx)),
    );
    map.insert(
        "lineWidth".to_string(),
        json!(styler::line_width(location, ctx)),
    );
    map
}

fn layers() -> Vec<LayerDescriptor> {
    let fill = styler::polygon_fill_paint();
    let line = styler::polygon_line_paint();

    vec![
        LayerDescriptor {
            id: "locations-polygons-fill".to_string(),
            layer_type: "fill".to_string(),
            source: POLYGON_SOURCE.to_string(),
            paint: json!({
                "fill-color": ["get", "fillColor"],
                "fill-opacity": fill.fill_opacity,
            }),
        },
        LayerDescriptor {
            id: "locations-polygons-outline".to_string(),
            layer_type: "line".to_string(),
            source: POLYGON_SOURCE.to_string(),
            paint: json!({
                "line-color": ["get", "fillColor"],
                "line-width": ["get", "lineWidth"],
            }),
        },
        LayerDescriptor {
            id: "locations-points".to_string(),
            layer_type: "circle".to_string(),
            source: POINT_SOURCE.to_string(),
            paint: json!({
                "circle-color": ["get", "fillColor"],
                "circle-radius": 6,
                "circle-stroke-width": line.line_width,
                "circle-stroke-color": "#ffffff",
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::{Category, Coordinates, PolygonEntry, Status};

    fn location(id: &str, ring: &[(f64, f64)]) -> Location {
        Location {
            id: id.to_string(),
            title: "T".to_string(),
            location_name: "N".to_string(),
            description: "d".to_string(),
            category: Category::Beach,
            status: Status::Active,
            coordinates: Coordinates {
                latitude: -34.0,
                longitude: 18.4,
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
    fn test_point_only_location_produces_no_polygon_feature() {
        let loc = location("a", &[]);
        let sources = build(&[&loc], &StyleContext::default());
        assert_eq!(sources.points.features.len(), 1);
        assert!(sources.polygons.features.is_empty());
    }

    #[test]
    fn test_polygon_feature_carries_closed_lon_lat_ring() {
        let loc = location(
            "a",
            &[(-34.0, 18.3), (-34.1, 18.5), (-34.2, 18.2)],
        );
        let sources = build(&[&loc], &StyleContext::default());
        let feature = &sources.polygons.features[0];
        let Some(Geometry {
            value: Value::Polygon(rings),
            ..
        }) = &feature.geometry
        else {
            panic!("expected polygon geometry");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].first(), rings[0].last());
        assert_eq!(rings[0][0], vec![18.3, -34.0]);
    }

    #[test]
    fn test_selected_feature_gets_selected_fill() {
        let loc = location("a", &[]);
        let ctx = StyleContext {
            selected_id: Some("a"),
            hovered_id: None,
        };
        let sources = build(&[&loc], &ctx);
        let props = sources.points.features[0].properties.as_ref().unwrap();
        assert_eq!(props["fillColor"], styler::SELECTED_COLOR);
    }
}
