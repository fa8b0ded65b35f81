// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Garmin Connect's local timestamp layout (`startTimeLocal`).
const GARMIN_LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a date the way the activity search endpoint expects (`YYYY-MM-DD`).
pub fn format_query_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a Garmin local timestamp, accepting either a space or `T` separator
/// and an optional fractional second.
pub fn parse_local_datetime(raw: &str) -> Option<NaiveDateTime> {
    let normalized = raw.trim().replacen('T', " ", 1);
    let without_fraction = normalized.split('.').next().unwrap_or(&normalized);
    NaiveDateTime::parse_from_str(without_fraction, GARMIN_LOCAL_FORMAT).ok()
}

/// Inclusive window of `days` days ending at `end`.
pub fn window_ending(end: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (end - Duration::days(days), end)
}
