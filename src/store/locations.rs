// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Location loading and paginated querying.
//!
//! The store mirrors the CMS `locations` collection as a JSON file exported
//! at deploy time. Records are loaded once at startup; malformed records are
//! skipped with a warning so one bad document never takes down the batch.

use crate::models::location::{Category, Location, Status};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Read-only store of location records.
#[derive(Default, Clone)]
pub struct LocationStore {
    locations: Vec<Location>,
    /// Bumped per loaded dataset; used as a cluster-cache key
    generation: u64,
}

/// Sort orders offered by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    #[serde(rename = "a-z")]
    TitleAsc,
    #[serde(rename = "z-a")]
    TitleDesc,
}

/// Query parameters for a paginated location listing.
#[derive(Debug, Clone, Default)]
pub struct LocationQuery {
    pub category: Option<Category>,
    pub status: Option<Status>,
    /// Case-insensitive match over title, location name, description, tags
    pub search: Option<String>,
    pub sort: SortOrder,
    /// 1-indexed page number
    pub page: u32,
    pub per_page: u32,
}

/// Paginated response envelope (the CMS's paginated-docs shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PaginatedDocs<T> {
    pub docs: Vec<T>,
    pub total_docs: u32,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl LocationStore {
    /// Load locations from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| StoreError::Io(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load locations from a JSON string (array of location documents).
    ///
    /// Documents that fail to deserialize or carry unusable coordinates are
    /// skipped, never fatal.
    pub fn load_from_json(json_data: &str) -> Result<Self, StoreError> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(json_data).map_err(|e| StoreError::Parse(e.to_string()))?;

        let mut locations = Vec::with_capacity(raw.len());
        for value in raw {
            let id_hint = value
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or("<missing id>")
                .to_string();

            match serde_json::from_value::<Location>(value) {
                Ok(location) => {
                    if !location.coordinates.latitude.is_finite()
                        || !location.coordinates.longitude.is_finite()
                    {
                        tracing::warn!(id = %location.id, "Skipping location with non-finite coordinates");
                        continue;
                    }
                    locations.push(location);
                }
                Err(e) => {
                    tracing::warn!(id = %id_hint, error = %e, "Skipping malformed location record");
                }
            }
        }

        tracing::info!(count = locations.len(), "Loaded locations");
        Ok(Self {
            locations,
            generation: 1,
        })
    }

    /// All loaded locations.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Dataset generation, for downstream caches keyed by point set.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Look up a single location by id.
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Filtered view of the dataset (no pagination), used by the map
    /// source and cluster endpoints which always render the full match set.
    pub fn filter(&self, query: &LocationQuery) -> Vec<&Location> {
        let needle = query.search.as_deref().map(str::to_lowercase);

        self.locations
            .iter()
            .filter(|l| query.category.is_none_or(|c| l.category == c))
            .filter(|l| query.status.is_none_or(|s| l.status == s))
            .filter(|l| match &needle {
                Some(n) => matches_search(l, n),
                None => true,
            })
            .collect()
    }

    /// Paginated, sorted query over the dataset.
    pub fn query(&self, query: &LocationQuery) -> PaginatedDocs<Location> {
        let mut matched = self.filter(query);
        sort_locations(&mut matched, query.sort);

        let per_page = query.per_page.max(1);
        let total_docs = matched.len() as u32;
        let total_pages = total_docs.div_ceil(per_page).max(1);
        let page = query.page.clamp(1, total_pages);

        let start = ((page - 1) * per_page) as usize;
        let docs = matched
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();

        PaginatedDocs {
            docs,
            total_docs,
            page,
            per_page,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

fn matches_search(location: &Location, needle: &str) -> bool {
    location.title.to_lowercase().contains(needle)
        || location.location_name.to_lowercase().contains(needle)
        || location.description.to_lowercase().contains(needle)
        || location
            .tag_values()
            .any(|t| t.to_lowercase().contains(needle))
}

/// Parsed publish time; unparseable or absent timestamps sort as unpublished.
fn published_ts(location: &Location) -> Option<chrono::DateTime<chrono::Utc>> {
    location
        .published_at
        .as_deref()
        .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&chrono::Utc))
}

fn sort_locations(locations: &mut [&Location], sort: SortOrder) {
    match sort {
        // publishedAt descending, unpublished records last; id breaks ties
        SortOrder::Newest => locations.sort_by(|a, b| {
            published_ts(b)
                .cmp(&published_ts(a))
                .then_with(|| a.id.cmp(&b.id))
        }),
        SortOrder::Oldest => locations.sort_by(|a, b| {
            match (published_ts(a), published_ts(b)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
            .then_with(|| a.id.cmp(&b.id))
        }),
        SortOrder::TitleAsc => {
            locations.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
        SortOrder::TitleDesc => {
            locations.sort_by(|a, b| b.title.to_lowercase().cmp(&a.title.to_lowercase()))
        }
    }
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("Failed to parse locations JSON: {0}")]
    Parse(String),
}
