// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Garmin Connect API client.
//!
//! Handles:
//! - Credential exchange for a session token
//! - Session validation for a cached token
//! - Paginated activity search by date range
//! - Activity details with route polylines
//! - Rate limit and auth failure detection

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::credentials::{Credentials, Session, SessionToken};
use crate::time_utils::format_query_date;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Remote operations the pipeline needs from the fitness service.
///
/// Listing and detail calls return raw JSON; decoding into typed records
/// happens once, in the fetcher.
#[allow(async_fn_in_trait)]
pub trait FitnessApi {
    /// Exchange username/password for a new session token.
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken>;

    /// Check that a cached token is still accepted.
    async fn resume(&self, token: &SessionToken) -> Result<()>;

    /// One page of activities whose local start date is in `[start, end]`.
    async fn list_activities(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>>;

    /// Detail document for one activity (includes `geoPolylineDTO`).
    async fn activity_details(
        &self,
        session: &Session,
        activity_id: u64,
    ) -> Result<serde_json::Value>;
}

/// Garmin Connect client over HTTPS.
#[derive(Clone)]
pub struct GarminClient {
    http: reqwest::Client,
    base_url: String,
    sso_url: String,
}

impl GarminClient {
    /// Create a client from runtime configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("garmin-heatmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            sso_url: config.sso_url.clone(),
        })
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        token: &SessionToken,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, token.authorization())
            .query(query)
            .send()
            .await?;

        check_response_json(response).await
    }
}

impl FitnessApi for GarminClient {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken> {
        let (email, password) = credentials.pair().ok_or(Error::MissingCredentials)?;

        let response = self
            .http
            .post(&self.sso_url)
            .form(&[("username", email), ("password", password), ("embed", "true")])
            .send()
            .await
            .map_err(|e| Error::Connection(format!("Login request failed: {}", e)))?;

        let token: TokenResponse = check_response_json(response).await?;
        tracing::info!("Garmin Connect login successful");
        Ok(token.into_session_token(Utc::now()))
    }

    async fn resume(&self, token: &SessionToken) -> Result<()> {
        let url = format!("{}/userprofile-service/socialProfile", self.base_url);
        let _profile: serde_json::Value = self.get_json(&url, token, &[]).await?;
        Ok(())
    }

    async fn list_activities(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>> {
        let url = format!(
            "{}/activitylist-service/activities/search/activities",
            self.base_url
        );
        self.get_json(
            &url,
            &session.token,
            &[
                ("startDate", format_query_date(start)),
                ("endDate", format_query_date(end)),
                ("start", offset.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn activity_details(
        &self,
        session: &Session,
        activity_id: u64,
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}/activity-service/activity/{}/details",
            self.base_url, activity_id
        );
        self.get_json(
            &url,
            &session.token,
            &[
                ("maxChartSize", "2000".to_string()),
                ("maxPolylineSize", "4000".to_string()),
            ],
        )
        .await
    }
}

/// Map an HTTP status to the pipeline's error taxonomy.
pub fn status_error(status: reqwest::StatusCode, body: &str) -> Error {
    match status.as_u16() {
        429 => {
            tracing::warn!("Garmin Connect rate limit hit (429)");
            Error::TooManyRequests
        }
        401 | 403 => Error::Authentication(format!("HTTP {}", status)),
        _ => Error::Connection(format!("HTTP {}: {}", status, body)),
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }

    response
        .json()
        .await
        .map_err(|e| Error::Connection(format!("JSON parse error: {}", e)))
}

/// Token payload returned by the credential exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Absolute expiry (unix seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Relative expiry (seconds from now)
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    pub fn into_session_token(self, now: DateTime<Utc>) -> SessionToken {
        let expires_at = self
            .expires_at
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .or_else(|| {
                self.expires_in
                    .map(|secs| now + chrono::Duration::seconds(secs))
            });

        SessionToken {
            access_token: self.access_token,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}

/// Activity entry from the search endpoint. Everything is optional here;
/// required fields are enforced when converting to `ActivityRecord`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminActivitySummary {
    pub activity_id: Option<u64>,
    pub start_time_local: Option<String>,
    pub distance: Option<f64>,
    pub activity_type: Option<GarminActivityType>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GarminActivityType {
    pub type_key: Option<String>,
}

/// Activity details; only the route polyline is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GarminActivityDetails {
    #[serde(rename = "geoPolylineDTO", default)]
    pub geo_polyline: Option<GeoPolylineDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoPolylineDto {
    #[serde(default)]
    pub polyline: Option<Vec<PolylinePoint>>,
}

/// One polyline sample; either coordinate may be missing.
#[derive(Debug, Clone, Deserialize)]
pub struct PolylinePoint {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl GarminActivityDetails {
    /// Route points that carry both coordinates, or `None` if there is no
    /// polyline data at all.
    pub fn route_points(&self) -> Option<Vec<crate::models::GeoPoint>> {
        let polyline = self.geo_polyline.as_ref()?.polyline.as_ref()?;
        let points: Vec<_> = polyline
            .iter()
            .filter_map(|p| match (p.lat, p.lon) {
                (Some(lat), Some(lon)) => Some(crate::models::GeoPoint::new(lat, lon)),
                _ => None,
            })
            .collect();

        if points.is_empty() {
            None
        } else {
            Some(points)
        }
    }
}
