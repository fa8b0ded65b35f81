// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pipeline error types.

/// Error type shared by every stage of the fetch/normalize/render pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing credentials: set EMAIL and PASSWORD environment variables")]
    MissingCredentials,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Too many requests, rate limit hit")]
    TooManyRequests,

    #[error("Malformed activity record: field `{field}`: {detail}")]
    MalformedRecord { field: &'static str, detail: String },

    #[error("Token store error: {0}")]
    TokenStore(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("No data available")]
    NoData,
}

impl Error {
    /// True for the remote failures that abort a fetch: network, rate limit, auth.
    pub fn is_fatal_remote(&self) -> bool {
        matches!(
            self,
            Error::Connection(_) | Error::TooManyRequests | Error::Authentication(_)
        )
    }

    /// Top-level message logged when a run ends with this error.
    pub fn diagnostic(&self) -> &'static str {
        if self.is_fatal_remote() {
            "Error fetching activities"
        } else {
            "Run failed"
        }
    }

    /// True if the service rejected our credentials or cached token.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }

    pub(crate) fn malformed(field: &'static str, detail: impl Into<String>) -> Self {
        Error::MalformedRecord {
            field,
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Connection(e.to_string())
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(e: crate::config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

/// Result type alias for pipeline stages
pub type Result<T> = std::result::Result<T, Error>;
