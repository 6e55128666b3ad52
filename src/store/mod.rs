// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! Read-only location store (JSON export of the CMS collection).

pub mod locations;

pub use locations::{LocationStore, PaginatedDocs, SortOrder, StoreError};
