// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Garmin Heatmap: calendar and route heatmaps from Garmin Connect activities
//!
//! This crate authenticates against Garmin Connect (with an on-disk token
//! cache), fetches recent activities, normalizes them, and renders a
//! calendar heatmap PNG or a Google Maps route heatmap page.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod services;
pub mod time_utils;
