// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Configuration loaded from environment variables, plus the per-tool
//! constants that replace command-line flags.

use crate::services::credentials::Credentials;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Garmin Connect API base URL.
pub const DEFAULT_API_URL: &str = "https://connectapi.garmin.com";
/// Default Garmin SSO credential exchange URL.
pub const DEFAULT_SSO_URL: &str = "https://sso.garmin.com/sso/signin";
/// Placeholder used when no Google Maps key is configured.
pub const PLACEHOLDER_MAPS_API_KEY: &str = "your_api_key";

/// Runtime configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interactive-login credentials (only needed without a cached token)
    pub credentials: Credentials,
    /// Garmin Connect API base URL
    pub api_url: String,
    /// Garmin SSO credential exchange URL
    pub sso_url: String,
    /// Per-request timeout
    pub http_timeout: Duration,
    /// Google Maps JavaScript API key (heatmap tool)
    pub google_maps_api_key: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            api_url: DEFAULT_API_URL.to_string(),
            sso_url: DEFAULT_SSO_URL.to_string(),
            http_timeout: Duration::from_secs(30),
            google_maps_api_key: PLACEHOLDER_MAPS_API_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECS", raw.clone()))?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(30),
        };

        Ok(Self {
            credentials: Credentials::new(lookup("EMAIL"), lookup("PASSWORD")),
            api_url: lookup("GARMIN_CONNECT_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            sso_url: lookup("GARMIN_SSO_URL").unwrap_or_else(|| DEFAULT_SSO_URL.to_string()),
            http_timeout,
            google_maps_api_key: lookup("GOOGLE_MAPS_API_KEY")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_MAPS_API_KEY.to_string()),
        })
    }
}

/// Fixed knobs of one tool. The two tools keep independent token caches
/// and fetch windows.
#[derive(Debug, Clone)]
pub struct ToolProfile {
    /// Token cache path, relative to the user's home directory
    pub token_file: &'static str,
    /// Length of the fetch window ending today, in days
    pub fetch_days: i64,
    /// Output artifact path
    pub output_file: &'static str,
}

impl ToolProfile {
    /// Calendar heatmap of the last 30 days.
    pub fn calendar() -> Self {
        Self {
            token_file: ".garminconnect",
            fetch_days: 30,
            output_file: "calendar.png",
        }
    }

    /// Route heatmap of the last 90 days.
    pub fn heatmap() -> Self {
        Self {
            token_file: ".garmin-tokens",
            fetch_days: 90,
            output_file: "garmin_heatmap.html",
        }
    }

    /// Resolve the token cache path under the user's home directory.
    pub fn token_path(&self) -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(self.token_file))
            .ok_or(ConfigError::NoHomeDir)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_defaults() {
        let env = vars(&[]);
        let config = Config::from_vars(|k| env.get(k).cloned()).expect("Config should load");

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.google_maps_api_key, PLACEHOLDER_MAPS_API_KEY);
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn test_config_from_vars() {
        let env = vars(&[
            ("EMAIL", "runner@example.com"),
            ("PASSWORD", "hunter2"),
            ("GARMIN_CONNECT_API_URL", "http://localhost:9999/"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("GOOGLE_MAPS_API_KEY", " abc123 "),
        ]);
        let config = Config::from_vars(|k| env.get(k).cloned()).expect("Config should load");

        assert!(config.credentials.is_complete());
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.google_maps_api_key, "abc123");
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let env = vars(&[("HTTP_TIMEOUT_SECS", "soon")]);
        let err = Config::from_vars(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("HTTP_TIMEOUT_SECS", _)));
    }

    #[test]
    fn test_tool_profiles_are_independent() {
        let calendar = ToolProfile::calendar();
        let heatmap = ToolProfile::heatmap();

        assert_ne!(calendar.token_file, heatmap.token_file);
        assert_eq!(calendar.fetch_days, 30);
        assert_eq!(heatmap.fetch_days, 90);
        assert_eq!(calendar.output_file, "calendar.png");
        assert_eq!(heatmap.output_file, "garmin_heatmap.html");
    }
}
