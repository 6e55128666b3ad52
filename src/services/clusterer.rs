// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Viewport-driven marker clustering.
//!
//! Clustering happens in Web-Mercator world-pixel space at the requested
//! zoom: two points merge when they sit within `radius_px` screen pixels of
//! each other. The output is a pure function of (points, bounds, zoom,
//! radius, max zoom); points are processed in sorted-id order and cluster
//! ids derive from the lowest member id, so identical inputs always produce
//! identical cluster sets.

use crate::models::ClusterNode;
use dashmap::DashMap;
use geo::Rect;
use std::collections::HashMap;

/// Maximum zoom supported by the rendering surface.
pub const MAX_ZOOM: f64 = 20.0;

/// Mercator tile size in pixels at zoom 0.
const WORLD_TILE_SIZE: f64 = 256.0;

/// A point record prepared for clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPoint {
    pub id: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Whole-world bounds, the fallback before the first viewport-ready event.
pub fn world_bounds() -> Rect<f64> {
    Rect::new(
        geo::coord! { x: -180.0, y: -90.0 },
        geo::coord! { x: 180.0, y: 90.0 },
    )
}

/// Distance/zoom clustering policy.
#[derive(Debug, Clone)]
pub struct Clusterer {
    /// Merge radius in screen pixels
    radius_px: f64,
    /// Above this zoom every point renders individually
    max_cluster_zoom: f64,
}

impl Default for Clusterer {
    fn default() -> Self {
        Self::new(50.0, 14.0)
    }
}

impl Clusterer {
    pub fn new(radius_px: f64, max_cluster_zoom: f64) -> Self {
        Self {
            radius_px,
            max_cluster_zoom,
        }
    }

    /// Cluster the points visible within `bounds` at the given zoom.
    pub fn cluster(&self, points: &[ClusterPoint], bounds: &Rect<f64>, zoom: f64) -> Vec<ClusterNode> {
        let mut visible: Vec<&ClusterPoint> = points
            .iter()
            .filter(|p| in_bounds(p, bounds))
            .collect();
        visible.sort_by(|a, b| a.id.cmp(&b.id));

        if zoom > self.max_cluster_zoom {
            return visible.into_iter().map(single_node).collect();
        }

        let projected: Vec<(f64, f64)> = visible
            .iter()
            .map(|p| world_pixel(p.longitude, p.latitude, zoom))
            .collect();

        // Grid buckets with cell size = radius, so all neighbors within the
        // merge radius live in the 3x3 cell neighborhood.
        let cell = self.radius_px.max(1.0);
        let mut grid: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, &(x, y)) in projected.iter().enumerate() {
            grid.entry(grid_cell(x, y, cell)).or_default().push(i);
        }

        let mut visited = vec![false; visible.len()];
        let mut nodes = Vec::new();

        for i in 0..visible.len() {
            if visited[i] {
                continue;
            }
            visited[i] = true;

            let (px, py) = projected[i];
            let (cx, cy) = grid_cell(px, py, cell);

            let mut members = vec![i];
            for dx in -1..=1 {
                for dy in -1..=1 {
                    let Some(bucket) = grid.get(&(cx + dx, cy + dy)) else {
                        continue;
                    };
                    for &j in bucket {
                        if visited[j] {
                            continue;
                        }
                        let (qx, qy) = projected[j];
                        if (qx - px).hypot(qy - py) <= self.radius_px {
                            visited[j] = true;
                            members.push(j);
                        }
                    }
                }
            }

            if members.len() == 1 {
                nodes.push(single_node(visible[i]));
            } else {
                members.sort_by(|&a, &b| visible[a].id.cmp(&visible[b].id));
                let count = members.len() as u32;
                let longitude =
                    members.iter().map(|&m| visible[m].longitude).sum::<f64>() / count as f64;
                let latitude =
                    members.iter().map(|&m| visible[m].latitude).sum::<f64>() / count as f64;
                let member_ids: Vec<String> =
                    members.iter().map(|&m| visible[m].id.clone()).collect();

                nodes.push(ClusterNode::Cluster {
                    id: format!("cluster-{}-{}", zoom, member_ids[0]),
                    longitude,
                    latitude,
                    count,
                    member_ids,
                });
            }
        }

        nodes
    }

    /// Smallest zoom strictly greater than `formation_zoom` at which the
    /// members no longer form a single cluster, capped at [`MAX_ZOOM`].
    ///
    /// Used to compute the fly-to target when a cluster is activated.
    pub fn expansion_zoom(&self, members: &[ClusterPoint], formation_zoom: f64) -> f64 {
        let bounds = world_bounds();
        let start = formation_zoom.floor() as i64 + 1;

        for z in start..(MAX_ZOOM as i64) {
            let zoom = z as f64;
            if self.cluster(members, &bounds, zoom).len() > 1 {
                return zoom;
            }
        }
        MAX_ZOOM
    }
}

/// Clusterer with a cross-request result cache.
///
/// Clustering is cheap enough to re-run on every state change; the cache
/// only avoids rebuilding the grid for repeated identical viewport queries
/// (a performance optimization, never a correctness requirement).
pub struct CachedClusterer {
    clusterer: Clusterer,
    cache: DashMap<CacheKey, Vec<ClusterNode>>,
}

type CacheKey = (u64, i64, i64, i64, i64, i64);

impl CachedClusterer {
    pub fn new(clusterer: Clusterer) -> Self {
        Self {
            clusterer,
            cache: DashMap::new(),
        }
    }

    pub fn clusterer(&self) -> &Clusterer {
        &self.clusterer
    }

    /// Cluster with memoization keyed by dataset generation and quantized
    /// viewport (1e-6 degrees, 1e-2 zoom).
    pub fn cluster(
        &self,
        generation: u64,
        points: &[ClusterPoint],
        bounds: &Rect<f64>,
        zoom: f64,
    ) -> Vec<ClusterNode> {
        let key = (
            generation,
            quantize(bounds.min().x, 1e6),
            quantize(bounds.min().y, 1e6),
            quantize(bounds.max().x, 1e6),
            quantize(bounds.max().y, 1e6),
            quantize(zoom, 1e2),
        );

        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let nodes = self.clusterer.cluster(points, bounds, zoom);
        self.cache.insert(key, nodes.clone());
        nodes
    }
}

fn quantize(v: f64, scale: f64) -> i64 {
    (v * scale).round() as i64
}

fn in_bounds(p: &ClusterPoint, bounds: &Rect<f64>) -> bool {
    p.longitude >= bounds.min().x
        && p.longitude <= bounds.max().x
        && p.latitude >= bounds.min().y
        && p.latitude <= bounds.max().y
}

fn single_node(p: &ClusterPoint) -> ClusterNode {
    ClusterNode::Single {
        id: format!("single-{}", p.id),
        longitude: p.longitude,
        latitude: p.latitude,
        location_id: p.id.clone(),
    }
}

fn grid_cell(x: f64, y: f64, cell: f64) -> (i64, i64) {
    ((x / cell).floor() as i64, (y / cell).floor() as i64)
}

/// Project a coordinate to world-pixel space at the given zoom.
pub(crate) fn world_pixel(longitude: f64, latitude: f64, zoom: f64) -> (f64, f64) {
    let size = WORLD_TILE_SIZE * 2f64.powf(zoom);
    let x = (longitude + 180.0) / 360.0 * size;
    // Clamp to the Mercator limit so poles stay finite
    let lat = latitude.clamp(-85.051_13, 85.051_13).to_radians();
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}
