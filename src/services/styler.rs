// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Deterministic paint parameters for markers and polygon overlays.
//!
//! Resolution priority, highest first: selected > hovered > status color >
//! default gray. Every input resolves to a color; the styler never fails.

use crate::models::location::{Location, Status};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const SELECTED_COLOR: &str = "#2563eb";
pub const HOVER_COLOR: &str = "#60a5fa";
pub const ACTIVE_COLOR: &str = "#22c55e";
pub const UNDER_DEVELOPMENT_COLOR: &str = "#f59e0b";
pub const CLOSED_COLOR: &str = "#ef4444";
pub const SEASONAL_COLOR: &str = "#0ea5e9";
pub const DEFAULT_COLOR: &str = "#9ca3af";

/// Interaction context consulted when resolving paint.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleContext<'a> {
    /// Currently selected location id, if any
    pub selected_id: Option<&'a str>,
    /// Currently hovered location id, if any
    pub hovered_id: Option<&'a str>,
}

impl<'a> StyleContext<'a> {
    fn is_selected(&self, id: &str) -> bool {
        self.selected_id == Some(id)
    }

    fn is_hovered(&self, id: &str) -> bool {
        self.hovered_id == Some(id)
    }
}

/// Fill color for a location's polygon overlay or marker.
pub fn fill_color(location: &Location, ctx: &StyleContext) -> &'static str {
    if ctx.is_selected(&location.id) {
        SELECTED_COLOR
    } else if ctx.is_hovered(&location.id) {
        HOVER_COLOR
    } else {
        status_color(Some(location.status))
    }
}

/// Outline width for a location's polygon overlay.
pub fn line_width(location: &Location, ctx: &StyleContext) -> f64 {
    if ctx.is_selected(&location.id) {
        3.0
    } else if ctx.is_hovered(&location.id) {
        2.0
    } else {
        1.0
    }
}

/// Status-based color; `None` (missing or unrecognized status) falls back
/// to the default gray. Total over all inputs.
pub fn status_color(status: Option<Status>) -> &'static str {
    match status {
        Some(Status::Active) => ACTIVE_COLOR,
        Some(Status::UnderDevelopment) => UNDER_DEVELOPMENT_COLOR,
        Some(Status::Closed) => CLOSED_COLOR,
        Some(Status::Seasonal) => SEASONAL_COLOR,
        None => DEFAULT_COLOR,
    }
}

/// Paint descriptor for a fill layer, serialized for the rendering surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FillPaint {
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Paint descriptor for a line layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LinePaint {
    pub line_color: String,
    pub line_width: f64,
}

/// Default paint for the polygon overlay layers (per-feature colors are
/// carried as feature properties and override these via data-driven style).
pub fn polygon_fill_paint() -> FillPaint {
    FillPaint {
        fill_color: DEFAULT_COLOR.to_string(),
        fill_opacity: 0.4,
    }
}

pub fn polygon_line_paint() -> LinePaint {
    LinePaint {
        line_color: DEFAULT_COLOR.to_string(),
        line_width: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::location::{Category, Coordinates};

    fn active_location(id: &str) -> Location {
        Location {
            id: id.to_string(),
            title: "T".to_string(),
            location_name: "N".to_string(),
            description: "d".to_string(),
            category: Category::MarineProtectedArea,
            status: Status::Active,
            coordinates: Coordinates {
                latitude: -33.9,
                longitude: 18.4,
            },
            polygon: vec![],
            tags: vec![],
            contact_info: None,
            additional_info: None,
            published_at: None,
            slug: None,
        }
    }

    #[test]
    fn test_status_color_when_not_selected_or_hovered() {
        let loc = active_location("a");
        assert_eq!(fill_color(&loc, &StyleContext::default()), ACTIVE_COLOR);
    }

    #[test]
    fn test_hover_overrides_status() {
        let loc = active_location("a");
        let ctx = StyleContext {
            hovered_id: Some("a"),
            ..Default::default()
        };
        assert_eq!(fill_color(&loc, &ctx), HOVER_COLOR);
    }

    #[test]
    fn test_selection_outranks_hover() {
        let loc = active_location("a");
        let ctx = StyleContext {
            selected_id: Some("a"),
            hovered_id: Some("a"),
        };
        assert_eq!(fill_color(&loc, &ctx), SELECTED_COLOR);
        assert_eq!(line_width(&loc, &ctx), 3.0);
    }

    #[test]
    fn test_every_status_resolves() {
        for status in [
            Some(Status::Active),
            Some(Status::UnderDevelopment),
            Some(Status::Closed),
            Some(Status::Seasonal),
            None,
        ] {
            assert!(status_color(status).starts_with('#'));
        }
    }
}
