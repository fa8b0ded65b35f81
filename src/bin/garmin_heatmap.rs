// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route heatmap on a Google map from the last 90 days of activities.

use anyhow::Context;
use chrono::Local;
use garmin_heatmap::{
    config::{Config, ToolProfile},
    error::Error,
    logging::init_logging,
    pipeline,
    render::{GoogleMapsHtmlRenderer, MapOptions},
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
                tracing::info!("No data available to create heatmap");
                ExitCode::SUCCESS
            }
            other => {
                let diagnostic = other.map_or("Run failed", Error::diagnostic);
                let message = format!("{:#}", e);
                tracing::error!(error = %message, "heatmap: {}", diagnostic);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let profile = ToolProfile::heatmap();

    let (client, session) = pipeline::connect(&config, &profile).await?;

    let (start, end) = window_ending(Local::now().date_naive(), profile.fetch_days);
    let output = Path::new(profile.output_file);
    let options = MapOptions::new(config.google_maps_api_key.clone());
    if options.api_key == garmin_heatmap::config::PLACEHOLDER_MAPS_API_KEY {
        tracing::warn!("GOOGLE_MAPS_API_KEY not set, map tiles will not load");
    }

    let points = pipeline::run_heatmap(
        &client,
        &session,
        start,
        end,
        &GoogleMapsHtmlRenderer,
        &options,
        output,
    )
    .await?;

    tracing::info!(
        points = points.len(),
        path = %output.display(),
        "Heatmap saved"
    );
    Ok(())
}
