// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! View-state synchronization with the addressable URL.
//!
//! The synchronizer owns the live [`ViewState`] and a commit history of
//! canonical query strings, modeling the browser history the frontend
//! writes through its URL-parameter bindings. Continuous viewport updates
//! are debounced (trailing edge) and committed with `Replace` so panning
//! never floods the history; discrete actions commit immediately with
//! `Push`. State is explicit: passed in, handed out, no hidden singletons.

use crate::models::ViewState;
use std::time::{Duration, Instant};

/// How a commit lands in the navigation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Append a new history entry (discrete actions)
    Push,
    /// Overwrite the current entry (continuous viewport drags)
    Replace,
}

#[derive(Debug)]
struct PendingCommit {
    deadline: Instant,
}

/// Bidirectional binding between map state and the shareable URL.
#[derive(Debug)]
pub struct ViewStateSync {
    state: ViewState,
    history: Vec<String>,
    throttle: Duration,
    pending: Option<PendingCommit>,
}

impl ViewStateSync {
    /// Start from an explicit initial state (e.g. parsed from a shared URL).
    pub fn new(initial: ViewState, throttle: Duration) -> Self {
        let history = vec![initial.to_query()];
        Self {
            state: initial,
            history,
            throttle,
            pending: None,
        }
    }

    /// Restore state from a shared URL query string.
    pub fn from_query(query: &str, throttle: Duration) -> Self {
        Self::new(ViewState::parse_query(query), throttle)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Committed history, newest last. The last entry is the current URL.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn has_pending_commit(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a viewport change (pan/zoom).
    ///
    /// The live state updates immediately; the URL commit is debounced:
    /// the first update in a burst schedules a commit `throttle` later, and
    /// later updates inside the window only change the value that commit
    /// will carry. Call [`flush`](Self::flush) to land due commits.
    pub fn set_viewport(&mut self, longitude: f64, latitude: f64, zoom: f64, now: Instant) {
        self.state.longitude = longitude;
        self.state.latitude = latitude;
        self.state.zoom = zoom;

        if self.pending.is_none() {
            self.pending = Some(PendingCommit {
                deadline: now + self.throttle,
            });
        }
    }

    /// Commit a due debounced viewport write. Returns true if a commit
    /// landed.
    pub fn flush(&mut self, now: Instant) -> bool {
        match &self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                self.commit(HistoryMode::Replace);
                true
            }
            _ => false,
        }
    }

    /// Toggle a location's active state (idempotent).
    ///
    /// Selecting inserts the id into both the marker and polygon sets and
    /// marks it selected; toggling an already-active id removes it from
    /// both sets and clears the selection if it was the selected record.
    pub fn toggle_location(&mut self, id: &str) {
        if self.state.marker_ids.contains(id) {
            self.state.marker_ids.remove(id);
            self.state.polygon_ids.remove(id);
            if self.state.selected_location_id == id {
                self.state.selected_location_id.clear();
            }
        } else {
            self.state.marker_ids.insert(id.to_string());
            self.state.polygon_ids.insert(id.to_string());
            self.state.selected_location_id = id.to_string();
        }
        self.commit(HistoryMode::Push);
    }

    /// Clear the current selection (empty-map click or popup close).
    pub fn clear_selection(&mut self) {
        if self.state.selected_location_id.is_empty() {
            return;
        }
        self.state.selected_location_id.clear();
        self.commit(HistoryMode::Push);
    }

    fn commit(&mut self, mode: HistoryMode) {
        let query = self.state.to_query();
        match mode {
            HistoryMode::Push => self.history.push(query),
            HistoryMode::Replace => match self.history.last_mut() {
                Some(last) => *last = query,
                None => self.history.push(query),
            },
        }
        tracing::debug!(url = %self.history.last().map(String::as_str).unwrap_or(""), "Committed view state");
    }
}
