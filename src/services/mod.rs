// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - credential, fetch and normalization layer.

pub mod credentials;
pub mod fetcher;
pub mod garmin;
pub mod normalize;

pub use credentials::{
    obtain_session, Credentials, Session, SessionSource, SessionToken, TokenStore,
};
pub use fetcher::ActivityFetcher;
pub use garmin::{FitnessApi, GarminClient};
pub use normalize::{daily_distance, extract_points, normalize, CalendarFilter, Normalized};
