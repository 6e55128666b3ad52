// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Freehand polygon drawing and area measurement.
//!
//! Drawing itself is delegated to the embedded drawing engine on the
//! rendering surface; this module owns the engine configuration, mirrors
//! the engine's current feature set on every create/update/delete event,
//! and recomputes the enclosed area in square meters. The area algorithm is
//! Chamberlain–Duquette, the same one the frontend's geometry library uses,
//! so readouts agree across the stack. Self-intersecting rings get whatever
//! best-effort value the algorithm produces.

use geo::{ChamberlainDuquetteArea, Polygon};

/// Prompt shown when there is nothing to measure yet.
pub const DRAW_PROMPT: &str = "Click the map to draw a polygon.";

/// Which engine controls are enabled. Only polygon-draw and delete, per
/// the measurement tool's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawControls {
    pub polygon: bool,
    pub trash: bool,
}

/// Engine interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    DrawPolygon,
    SimpleSelect,
}

/// Drawing-engine configuration (the tool's embedded engine instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawConfig {
    pub display_controls_default: bool,
    pub controls: DrawControls,
    pub default_mode: DrawMode,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            display_controls_default: false,
            controls: DrawControls {
                polygon: true,
                trash: true,
            },
            default_mode: DrawMode::DrawPolygon,
        }
    }
}

/// Engine events the tool listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawEventKind {
    Create,
    Update,
    Delete,
}

/// What the measurement box shows.
#[derive(Debug, Clone, PartialEq)]
pub enum AreaReadout {
    /// Nothing drawn yet; show [`DRAW_PROMPT`]
    Prompt,
    /// Everything deleted; show nothing, no prompt
    Cleared,
    /// Enclosed area in square meters, rounded to two decimals
    SquareMeters(f64),
}

/// Area-measurement tool bound to a drawing engine for its lifetime.
///
/// Construction attaches the engine control and event listeners; dropping
/// the tool releases both.
#[derive(Debug)]
pub struct MeasureTool {
    config: DrawConfig,
    features: Vec<Polygon<f64>>,
    readout: AreaReadout,
    attached: bool,
}

impl MeasureTool {
    pub fn attach(config: DrawConfig) -> Self {
        tracing::debug!("Draw control attached");
        Self {
            config,
            features: Vec::new(),
            readout: AreaReadout::Prompt,
            attached: true,
        }
    }

    pub fn config(&self) -> DrawConfig {
        self.config
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn readout(&self) -> &AreaReadout {
        &self.readout
    }

    /// Rounded area in square meters, if one is displayed.
    pub fn rounded_area(&self) -> Option<f64> {
        match self.readout {
            AreaReadout::SquareMeters(v) => Some(v),
            _ => None,
        }
    }

    /// Handle an engine event carrying the engine's current feature set.
    ///
    /// A delete that empties the canvas clears the readout silently; any
    /// other event with no features (e.g. a cancelled draw) re-shows the
    /// prompt.
    pub fn on_event(&mut self, kind: DrawEventKind, features: Vec<Polygon<f64>>) {
        self.features = features;

        if self.features.is_empty() {
            self.readout = if kind == DrawEventKind::Delete {
                AreaReadout::Cleared
            } else {
                AreaReadout::Prompt
            };
            return;
        }

        let area: f64 = self
            .features
            .iter()
            .map(|p| p.chamberlain_duquette_unsigned_area())
            .sum();
        self.readout = AreaReadout::SquareMeters((area * 100.0).round() / 100.0);
    }

    /// Current drawn feature set (the engine's `getAll()` mirror).
    pub fn features(&self) -> &[Polygon<f64>] {
        &self.features
    }
}

impl Drop for MeasureTool {
    fn drop(&mut self) {
        // Listener teardown and control removal happen together on unmount.
        self.attached = false;
        tracing::debug!("Draw control and event listeners removed");
    }
}
