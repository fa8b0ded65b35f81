// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity fetching service.
//!
//! Handles the retrieval workflow:
//! 1. Page through the activity search for a date range
//! 2. Decode each raw record into an `ActivityRecord`
//! 3. Drop anything outside the requested range
//! 4. Optionally fetch details for route polylines

use crate::error::{Error, Result};
use crate::models::ActivityRecord;
use crate::services::credentials::Session;
use crate::services::garmin::{FitnessApi, GarminActivityDetails, GarminActivitySummary};
use crate::time_utils::parse_local_datetime;
use chrono::NaiveDate;

/// Page size of the activity search endpoint.
pub const PAGE_SIZE: u32 = 20;

/// Fetches activity records through a `FitnessApi`.
pub struct ActivityFetcher<'a, A> {
    api: &'a A,
}

impl<'a, A: FitnessApi> ActivityFetcher<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Fetch all activities whose local start date is in `[start, end]`.
    ///
    /// With `include_geo`, each record also gets its route polyline (one
    /// detail request per activity).
    pub async fn fetch(
        &self,
        session: &Session,
        start: NaiveDate,
        end: NaiveDate,
        include_geo: bool,
    ) -> Result<Vec<ActivityRecord>> {
        if start > end {
            return Err(Error::Config(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }

        tracing::info!(%start, %end, include_geo, "Fetching activities");

        let mut records = Vec::new();
        let mut offset = 0;
        loop {
            let page = self
                .api
                .list_activities(session, start, end, offset, PAGE_SIZE)
                .await?;
            let page_len = page.len();

            for raw in page {
                let record = decode_activity(raw)?;
                let date = record.local_date();
                if date < start || date > end {
                    tracing::debug!(
                        activity_id = record.activity_id,
                        %date,
                        "Dropping activity outside requested range"
                    );
                    continue;
                }
                records.push(record);
            }

            if page_len < PAGE_SIZE as usize {
                break;
            }
            offset += PAGE_SIZE;
        }

        tracing::info!(count = records.len(), "Fetched activities");

        if include_geo {
            for record in &mut records {
                let raw = self
                    .api
                    .activity_details(session, record.activity_id)
                    .await?;
                record.polyline = decode_details(raw)?.route_points();

                if let Some(points) = &record.polyline {
                    tracing::debug!(
                        activity_id = record.activity_id,
                        points = points.len(),
                        "Found polyline"
                    );
                }
            }
        }

        Ok(records)
    }
}

/// Decode one search result into a validated record.
pub fn decode_activity(raw: serde_json::Value) -> Result<ActivityRecord> {
    let summary: GarminActivitySummary =
        serde_json::from_value(raw).map_err(|e| Error::malformed("activity", e.to_string()))?;
    ActivityRecord::try_from(summary)
}

fn decode_details(raw: serde_json::Value) -> Result<GarminActivityDetails> {
    serde_json::from_value(raw).map_err(|e| Error::malformed("geoPolylineDTO", e.to_string()))
}

impl TryFrom<GarminActivitySummary> for ActivityRecord {
    type Error = Error;

    fn try_from(summary: GarminActivitySummary) -> Result<Self> {
        let activity_id = summary
            .activity_id
            .ok_or_else(|| Error::malformed("activityId", "missing"))?;

        let raw_start = summary
            .start_time_local
            .ok_or_else(|| Error::malformed("startTimeLocal", "missing"))?;
        let start_time_local = parse_local_datetime(&raw_start).ok_or_else(|| {
            Error::malformed("startTimeLocal", format!("unparseable value {:?}", raw_start))
        })?;

        let activity_type = summary
            .activity_type
            .and_then(|t| t.type_key)
            .ok_or_else(|| Error::malformed("activityType.typeKey", "missing"))?;

        Ok(ActivityRecord {
            activity_id,
            start_time_local,
            distance: summary.distance,
            activity_type,
            polyline: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_activity_with_null_distance() {
        let record = decode_activity(json!({
            "activityId": 42,
            "startTimeLocal": "2024-05-01 07:12:33",
            "distance": null,
            "activityType": {"typeKey": "strength_training", "typeId": 13}
        }))
        .unwrap();

        assert_eq!(record.activity_id, 42);
        assert_eq!(record.distance, None);
        assert_eq!(record.activity_type, "strength_training");
    }

    #[test]
    fn test_decode_activity_missing_type_key() {
        let err = decode_activity(json!({
            "activityId": 42,
            "startTimeLocal": "2024-05-01 07:12:33",
            "activityType": {}
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            Error::MalformedRecord {
                field: "activityType.typeKey",
                ..
            }
        ));
    }

    #[test]
    fn test_decode_activity_bad_start_time() {
        let err = decode_activity(json!({
            "activityId": 1,
            "startTimeLocal": "last tuesday",
            "activityType": {"typeKey": "running"}
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            Error::MalformedRecord {
                field: "startTimeLocal",
                ..
            }
        ));
    }

    #[test]
    fn test_decode_activity_wrong_type() {
        let err = decode_activity(json!({"activityId": "not-a-number"})).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { field: "activity", .. }));
    }
}
