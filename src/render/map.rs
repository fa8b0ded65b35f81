// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Standalone HTML page with a Google Maps heatmap layer.

use crate::error::{Error, Result};
use crate::models::PointCollection;
use crate::render::MapRenderer;
use std::fs;
use std::path::Path;

const MAPS_SCRIPT_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// Map page settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub api_key: String,
    /// Heatmap point radius in pixels
    pub radius: u32,
    /// Initial zoom level
    pub zoom: u8,
}

impl MapOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            radius: 20,
            zoom: 13,
        }
    }
}

/// Map renderer writing a Google Maps heatmap page.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleMapsHtmlRenderer;

impl GoogleMapsHtmlRenderer {
    /// Build the HTML document, centred on the mean coordinate.
    pub fn to_html(&self, points: &PointCollection, options: &MapOptions) -> Result<String> {
        let center = points.center().ok_or(Error::NoData)?;

        let script_url = reqwest::Url::parse_with_params(
            MAPS_SCRIPT_URL,
            &[("key", options.api_key.as_str()), ("libraries", "visualization")],
        )
        .map_err(|e| Error::Render(format!("Invalid Maps script URL: {}", e)))?;

        let coords: Vec<[f64; 2]> = points.points().iter().map(|p| [p.lat, p.lon]).collect();
        let coords_json = serde_json::to_string(&coords)
            .map_err(|e| Error::Render(format!("Failed to encode points: {}", e)))?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Garmin activity heatmap</title>
<style>html, body, #map {{ height: 100%; margin: 0; padding: 0; }}</style>
<script src="{script}"></script>
<script>
function initialize() {{
  var map = new google.maps.Map(document.getElementById("map"), {{
    zoom: {zoom},
    center: new google.maps.LatLng({lat}, {lon})
  }});
  var coords = {coords};
  var data = coords.map(function (p) {{ return new google.maps.LatLng(p[0], p[1]); }});
  new google.maps.visualization.HeatmapLayer({{ data: data, radius: {radius}, map: map }});
}}
</script>
</head>
<body onload="initialize()">
<div id="map"></div>
</body>
</html>
"#,
            script = script_url.as_str().replace('&', "&amp;"),
            zoom = options.zoom,
            lat = center.lat,
            lon = center.lon,
            coords = coords_json,
            radius = options.radius,
        ))
    }
}

impl MapRenderer for GoogleMapsHtmlRenderer {
    fn render(&self, points: &PointCollection, options: &MapOptions, output: &Path) -> Result<()> {
        let html = self.to_html(points, options)?;
        fs::write(output, html)
            .map_err(|e| Error::Render(format!("Failed to write {}: {}", output.display(), e)))?;
        tracing::info!(path = %output.display(), points = points.len(), "Heatmap saved");
        Ok(())
    }
}
