// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Conservation location model, mirroring the CMS `locations` collection.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A catalogued conservation location in South Africa.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Location {
    /// Stable document ID (also used as feature ID on the map)
    pub id: String,
    /// Main title for this location point
    pub title: String,
    /// Specific name (e.g., "Cape Point", "Robben Island")
    pub location_name: String,
    /// Detailed description of the location and its significance
    pub description: String,
    pub category: Category,
    pub status: Status,
    /// Exact point coordinate, required for every record
    pub coordinates: Coordinates,
    /// Optional area boundary. Each entry wraps a one-element coordinate
    /// list (CMS array-of-group shape, flattened by the projector).
    #[serde(default)]
    pub polygon: Vec<PolygonEntry>,
    #[serde(default)]
    pub tags: Vec<TagEntry>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub additional_info: Option<AdditionalInfo>,
    /// Publish timestamp (RFC 3339), used for newest/oldest sorting
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl Location {
    /// True iff the record carries a non-empty area boundary.
    pub fn has_area(&self) -> bool {
        !self.polygon.is_empty()
    }

    /// Flattened tag strings.
    pub fn tag_values(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.tag.as_str())
    }
}

/// A point coordinate as stored (latitude-first field order in the CMS).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One entry of the polygon array. The CMS models each ring vertex as an
/// array field holding exactly one coordinate group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PolygonEntry {
    #[serde(default)]
    pub coordinates: Vec<Coordinates>,
}

/// Tag wrapper (CMS array-of-group shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TagEntry {
    pub tag: String,
}

/// Location category, matching the CMS select options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Category {
    MarineProtectedArea,
    WildlifeSanctuary,
    ConservationArea,
    ResearchStation,
    TouristAttraction,
    HistoricalSite,
    Beach,
    Harbor,
    Other,
}

impl Category {
    /// Human-readable label (sidebar display names).
    pub fn label(&self) -> &'static str {
        match self {
            Category::MarineProtectedArea => "Marine Protected Area",
            Category::WildlifeSanctuary => "Wildlife Sanctuary",
            Category::ConservationArea => "Conservation Area",
            Category::ResearchStation => "Research Station",
            Category::TouristAttraction => "Tourist Attraction",
            Category::HistoricalSite => "Historical Site",
            Category::Beach => "Beach",
            Category::Harbor => "Harbor",
            Category::Other => "Other",
        }
    }
}

/// Location status, matching the CMS select options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Status {
    Active,
    UnderDevelopment,
    Closed,
    Seasonal,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::UnderDevelopment => "Under Development",
            Status::Closed => "Closed",
            Status::Seasonal => "Seasonal",
        }
    }
}

/// Optional contact information group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// Optional visiting-details group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AdditionalInfo {
    #[serde(default)]
    pub operating_hours: Option<String>,
    #[serde(default)]
    pub entrance_fee: Option<String>,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
}
