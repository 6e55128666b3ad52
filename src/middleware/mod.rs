// SPDX-License-Identifier: MIT
// Copyright 2026 Wild Trust

//! HTTP middleware.

pub mod security;
