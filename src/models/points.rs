// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Flat collection of route points across all activities.

use crate::models::GeoPoint;
use geo::{Centroid, MultiPoint, Point};

/// All route points of a fetch, in activity order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCollection {
    points: Vec<GeoPoint>,
}

impl PointCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = GeoPoint>>(&mut self, points: I) {
        self.points.extend(points);
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean coordinate of all points, or `None` when empty.
    pub fn center(&self) -> Option<GeoPoint> {
        let multi: MultiPoint<f64> = self
            .points
            .iter()
            .map(|p| Point::new(p.lon, p.lat))
            .collect();
        multi.centroid().map(|c| GeoPoint::new(c.y(), c.x()))
    }
}

impl From<Vec<GeoPoint>> for PointCollection {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }
}
