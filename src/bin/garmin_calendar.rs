// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar heatmap of daily activity distance over the last 30 days.

use anyhow::Context;
use chrono::Local;
use garmin_heatmap::{
    config::{Config, ToolProfile},
    error::Error,
    logging::init_logging,
    pipeline,
    render::{CalendarOptions, PngCalendarRenderer},
    time_utils::window_ending,
};
use std::path::Path;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<Error>() {
            Some(Error::NoData) => {
                tracing::info!("No activities in range, calendar not drawn");
                ExitCode::SUCCESS
            }
            other => {
                let diagnostic = other.map_or("Run failed", Error::diagnostic);
                let message = format!("{:#}", e);
                tracing::error!(error = %message, "calendar: {}", diagnostic);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let profile = ToolProfile::calendar();

    let (client, session) = pipeline::connect(&config, &profile).await?;

    let (start, end) = window_ending(Local::now().date_naive(), profile.fetch_days);
    let output = Path::new(profile.output_file);

    let summary = pipeline::run_calendar(
        &client,
        &session,
        start,
        end,
        &PngCalendarRenderer,
        &CalendarOptions::default(),
        output,
    )
    .await?;

    tracing::info!(
        activities = summary.activities,
        missing_distance = summary.missing_count,
        days = summary.days,
        path = %output.display(),
        "Calendar heatmap saved"
    );
    Ok(())
}
