// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity records as decoded from Garmin Connect, and their flattened
//! calendar projection.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single geographic point on a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Validated activity record.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    /// Garmin activity ID
    pub activity_id: u64,
    /// Start time in the athlete's local timezone
    pub start_time_local: NaiveDateTime,
    /// Distance in meters; absent for e.g. strength or yoga sessions
    pub distance: Option<f64>,
    /// Activity type key (running, cycling, walking, ...)
    pub activity_type: String,
    /// Route points, filled only by a geo-enabled fetch
    pub polyline: Option<Vec<GeoPoint>>,
}

impl ActivityRecord {
    /// Local calendar date the activity started on.
    pub fn local_date(&self) -> NaiveDate {
        self.start_time_local.date()
    }

    /// Distance if present and a real number.
    pub fn known_distance(&self) -> Option<f64> {
        self.distance.filter(|d| !d.is_nan())
    }
}

/// Flattened row used for the calendar view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub activity_date: NaiveDateTime,
    pub distance: Option<f64>,
    pub activity_type: String,
}
