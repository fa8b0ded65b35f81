// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::NaiveDate;
use garmin_heatmap::error::{Error, Result};
use garmin_heatmap::services::{Credentials, FitnessApi, Session, SessionSource, SessionToken};
use serde_json::{json, Value};
use std::cell::Cell;
use std::collections::HashMap;

/// In-memory stand-in for Garmin Connect that counts every call.
///
/// The listing ignores the date range and pages over everything it holds,
/// like a server that returns a few records too many.
#[derive(Default)]
pub struct FakeApi {
    pub activities: Vec<Value>,
    pub details: HashMap<u64, Value>,
    pub reject_cached_token: bool,
    pub list_failure: Option<fn() -> Error>,
    pub login_calls: Cell<u32>,
    pub resume_calls: Cell<u32>,
    pub list_calls: Cell<u32>,
    pub detail_calls: Cell<u32>,
}

#[allow(dead_code)]
impl FakeApi {
    pub fn with_activities(activities: Vec<Value>) -> Self {
        Self {
            activities,
            ..Self::default()
        }
    }

    pub fn network_calls(&self) -> u32 {
        self.login_calls.get()
            + self.resume_calls.get()
            + self.list_calls.get()
            + self.detail_calls.get()
    }
}

impl FitnessApi for FakeApi {
    async fn login(&self, _credentials: &Credentials) -> Result<SessionToken> {
        self.login_calls.set(self.login_calls.get() + 1);
        Ok(token("fresh-token"))
    }

    async fn resume(&self, _token: &SessionToken) -> Result<()> {
        self.resume_calls.set(self.resume_calls.get() + 1);
        if self.reject_cached_token {
            return Err(Error::Authentication("HTTP 401 Unauthorized".to_string()));
        }
        Ok(())
    }

    async fn list_activities(
        &self,
        _session: &Session,
        _start: NaiveDate,
        _end: NaiveDate,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Value>> {
        self.list_calls.set(self.list_calls.get() + 1);
        if let Some(failure) = self.list_failure {
            return Err(failure());
        }
        Ok(self
            .activities
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn activity_details(&self, _session: &Session, activity_id: u64) -> Result<Value> {
        self.detail_calls.set(self.detail_calls.get() + 1);
        Ok(self
            .details
            .get(&activity_id)
            .cloned()
            .unwrap_or_else(|| json!({"activityId": activity_id})))
    }
}

#[allow(dead_code)]
pub fn token(access_token: &str) -> SessionToken {
    SessionToken {
        access_token: access_token.to_string(),
        token_type: "Bearer".to_string(),
        refresh_token: None,
        expires_at: None,
    }
}

#[allow(dead_code)]
pub fn session() -> Session {
    Session {
        token: token("test-token"),
        source: SessionSource::Cached,
    }
}

/// Raw search result as Garmin Connect returns it.
#[allow(dead_code)]
pub fn activity(id: u64, start_time_local: &str, distance: Option<f64>, type_key: &str) -> Value {
    json!({
        "activityId": id,
        "activityName": format!("Activity {}", id),
        "startTimeLocal": start_time_local,
        "distance": distance,
        "activityType": {"typeKey": type_key, "typeId": 1}
    })
}

/// Raw detail document with the given route.
#[allow(dead_code)]
pub fn details_with_route(points: &[(f64, f64)]) -> Value {
    let polyline: Vec<Value> = points
        .iter()
        .map(|(lat, lon)| json!({"lat": lat, "lon": lon, "altitude": 10.0}))
        .collect();
    json!({"geoPolylineDTO": {"polyline": polyline}})
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
