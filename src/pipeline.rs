// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end runs behind the two binaries: fetch, normalize, render.

use crate::config::{Config, ToolProfile};
use crate::error::{Error, Result};
use crate::models::PointCollection;
use crate::render::{CalendarOptions, CalendarRenderer, MapOptions, MapRenderer};
use crate::services::credentials::{obtain_session, Session, TokenStore};
use crate::services::fetcher::ActivityFetcher;
use crate::services::garmin::{FitnessApi, GarminClient};
use crate::services::normalize::{daily_distance, extract_points, normalize, CalendarFilter};
use chrono::{Datelike, NaiveDate};
use std::path::Path;

/// Outcome of a calendar run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarSummary {
    pub activities: usize,
    pub missing_count: usize,
    pub days: usize,
}

/// Fetch activities in `[start, end]` and render their daily distance.
///
/// The calendar is limited to the years the window spans.
pub async fn run_calendar<A, R>(
    api: &A,
    session: &Session,
    start: NaiveDate,
    end: NaiveDate,
    renderer: &R,
    options: &CalendarOptions,
    output: &Path,
) -> Result<CalendarSummary>
where
    A: FitnessApi,
    R: CalendarRenderer,
{
    let records = ActivityFetcher::new(api)
        .fetch(session, start, end, false)
        .await?;
    tracing::info!("Fetched activities data");

    let normalized = normalize(&records);
    tracing::info!(rows = normalized.rows.len(), "Processed activities data");
    for row in &normalized.rows {
        tracing::debug!(
            date = %row.activity_date,
            distance = ?row.distance,
            activity_type = %row.activity_type,
            "Activity"
        );
    }

    let filter = CalendarFilter {
        year_min: Some(start.year()),
        year_max: Some(end.year()),
        max_distance: None,
    };
    let days = daily_distance(&normalized.rows, &filter);
    if days.is_empty() {
        return Err(Error::NoData);
    }

    renderer.render(&days, options, output)?;

    Ok(CalendarSummary {
        activities: records.len(),
        missing_count: normalized.missing_count,
        days: days.len(),
    })
}

/// Fetch activities with routes in `[start, end]` and render a point heatmap.
///
/// Returns `Error::NoData` without touching the renderer when no activity
/// has route points.
pub async fn run_heatmap<A, R>(
    api: &A,
    session: &Session,
    start: NaiveDate,
    end: NaiveDate,
    renderer: &R,
    options: &MapOptions,
    output: &Path,
) -> Result<PointCollection>
where
    A: FitnessApi,
    R: MapRenderer,
{
    let records = ActivityFetcher::new(api)
        .fetch(session, start, end, true)
        .await?;
    tracing::info!(count = records.len(), "Fetched activities from Garmin Connect");

    let points = extract_points(&records);
    if points.is_empty() {
        return Err(Error::NoData);
    }

    renderer.render(&points, options, output)?;
    Ok(points)
}

/// Build the Garmin client and obtain the run's single session.
pub async fn connect(config: &Config, profile: &ToolProfile) -> Result<(GarminClient, Session)> {
    let token_path = profile.token_path()?;
    let client = GarminClient::new(config)?;
    let store = TokenStore::new(&token_path);
    let session = obtain_session(&client, &store, &config.credentials).await?;
    Ok((client, session))
}
