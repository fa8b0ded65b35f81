// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the pipeline.

pub mod activity;
pub mod points;

use chrono::NaiveDate;
use std::collections::BTreeMap;

pub use activity::{ActivityRecord, GeoPoint, NormalizedRow};
pub use points::PointCollection;

/// Summed distance per local calendar day, in date order.
pub type DailyDistance = BTreeMap<NaiveDate, f64>;
