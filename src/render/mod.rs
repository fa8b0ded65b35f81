// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Output renderers for the calendar and route heatmaps.

pub mod calendar;
pub mod map;

use crate::error::Result;
use crate::models::{DailyDistance, PointCollection};
use std::path::Path;

pub use calendar::{CalendarOptions, PngCalendarRenderer};
pub use map::{GoogleMapsHtmlRenderer, MapOptions};

/// Draws per-day totals as a calendar heatmap file.
pub trait CalendarRenderer {
    fn render(&self, days: &DailyDistance, options: &CalendarOptions, output: &Path)
        -> Result<()>;
}

/// Draws route points as a geographic heatmap file.
pub trait MapRenderer {
    fn render(&self, points: &PointCollection, options: &MapOptions, output: &Path) -> Result<()>;
}
