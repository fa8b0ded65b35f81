// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential bootstrap with an on-disk token cache.
//!
//! A cached token is preferred; interactive login with EMAIL/PASSWORD is
//! only attempted when there is no usable token, and its result is written
//! back to the cache.

use crate::error::{Error, Result};
use crate::services::garmin::FitnessApi;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when the token path points at a directory.
const TOKEN_FILE_NAME: &str = "oauth2_token.json";

/// Interactive-login credentials. Empty strings count as unset.
#[derive(Clone, Default)]
pub struct Credentials {
    email: Option<String>,
    password: Option<String>,
}

impl Credentials {
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            email: non_empty(email),
            password: non_empty(password),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.email.is_some() && self.password.is_some()
    }

    /// Both values, if both are set.
    pub fn pair(&self) -> Option<(&str, &str)> {
        Some((self.email.as_deref()?, self.password.as_deref()?))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Cached authentication token.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl SessionToken {
    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// A token without an expiry is kept until the server rejects it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Where the session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    Cached,
    Login,
}

/// Authenticated session, created once per run.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub source: SessionSource,
}

/// Token cache file on disk.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Use `path` as the token file, or a file inside it if it is a directory.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let path = if path.is_dir() {
            path.join(TOKEN_FILE_NAME)
        } else {
            path.to_path_buf()
        };
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached token. A missing file is `None`; an unreadable one
    /// is logged and also treated as `None`.
    pub fn load(&self) -> Result<Option<SessionToken>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::TokenStore(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        match serde_json::from_str(&data) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unparseable token file"
                );
                Ok(None)
            }
        }
    }

    /// Persist a token, creating parent directories as needed.
    pub fn save(&self, token: &SessionToken) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::TokenStore(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(token)
            .map_err(|e| Error::TokenStore(format!("Failed to encode token: {}", e)))?;
        self.write_private(json.as_bytes()).map_err(|e| {
            Error::TokenStore(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(path = %self.path.display(), "Token cached");
        Ok(())
    }

    /// Owner-only from creation; an existing file keeps its inode, so its
    /// mode is tightened before the token goes in.
    #[cfg(unix)]
    fn write_private(&self, data: &[u8]) -> std::io::Result<()> {
        use std::io::Write;
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&self.path)?;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(data)
    }

    #[cfg(not(unix))]
    fn write_private(&self, data: &[u8]) -> std::io::Result<()> {
        fs::write(&self.path, data)
    }
}

/// Obtain an authenticated session: cached token first, interactive login
/// second, configuration error if neither is possible.
pub async fn obtain_session<A: FitnessApi>(
    api: &A,
    store: &TokenStore,
    credentials: &Credentials,
) -> Result<Session> {
    if let Some(token) = store.load()? {
        if token.is_expired(Utc::now()) {
            tracing::info!(path = %store.path().display(), "Cached Garmin token expired");
        } else {
            match api.resume(&token).await {
                Ok(()) => {
                    tracing::info!(path = %store.path().display(), "Using existing Garmin tokens");
                    return Ok(Session {
                        token,
                        source: SessionSource::Cached,
                    });
                }
                Err(e) if e.is_auth_error() => {
                    tracing::warn!(error = %e, "Cached Garmin token rejected");
                }
                Err(e) => return Err(e),
            }
        }
    }

    if !credentials.is_complete() {
        return Err(Error::MissingCredentials);
    }

    tracing::info!("No usable Garmin tokens found. Authenticating...");
    let token = api.login(credentials).await?;
    store.save(&token)?;

    Ok(Session {
        token,
        source: SessionSource::Login,
    })
}
