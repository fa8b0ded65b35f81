// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record normalization: calendar rows, daily totals, and route points.

use crate::models::{ActivityRecord, DailyDistance, NormalizedRow, PointCollection};
use chrono::Datelike;

/// Normalized rows plus the number of records without a distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub rows: Vec<NormalizedRow>,
    pub missing_count: usize,
}

/// Flatten records into calendar rows. Records without a distance are kept
/// and counted; the count is logged once at the end.
pub fn normalize(records: &[ActivityRecord]) -> Normalized {
    let mut missing_count = 0;

    let rows = records
        .iter()
        .map(|record| {
            let distance = record.known_distance();
            if distance.is_none() {
                missing_count += 1;
                tracing::warn!(
                    activity_type = %record.activity_type,
                    date = %record.start_time_local,
                    "Missing distance for activity"
                );
            }
            NormalizedRow {
                activity_date: record.start_time_local,
                distance,
                activity_type: record.activity_type.clone(),
            }
        })
        .collect();

    tracing::info!(missing_count, "Total activities with missing distance");

    Normalized {
        rows,
        missing_count,
    }
}

/// Concatenate the route points of every record that has any.
pub fn extract_points(records: &[ActivityRecord]) -> PointCollection {
    let mut points = PointCollection::new();
    for polyline in records.iter().filter_map(|r| r.polyline.as_ref()) {
        points.extend(polyline.iter().copied());
    }
    points
}

/// Bounds applied to the daily totals before rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarFilter {
    /// Drop days before this year
    pub year_min: Option<i32>,
    /// Drop days after this year
    pub year_max: Option<i32>,
    /// Clip daily totals to `[0, max_distance]`. Zero, negative or
    /// non-finite ceilings leave totals unclipped.
    pub max_distance: Option<f64>,
}

/// Sum distances per local calendar day. A day whose activities have no
/// distance still appears with a total of zero.
pub fn daily_distance(rows: &[NormalizedRow], filter: &CalendarFilter) -> DailyDistance {
    let mut days = DailyDistance::new();
    for row in rows {
        *days.entry(row.activity_date.date()).or_insert(0.0) += row.distance.unwrap_or(0.0);
    }

    days.retain(|date, _| {
        filter.year_min.is_none_or(|min| date.year() >= min)
            && filter.year_max.is_none_or(|max| date.year() <= max)
    });

    if let Some(max) = filter.max_distance.filter(|m| m.is_finite() && *m > 0.0) {
        for value in days.values_mut() {
            *value = value.clamp(0.0, max);
        }
    }

    days
}
