// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tests for credential bootstrap and the on-disk token cache.

use chrono::Utc;
use garmin_heatmap::error::Error;
use garmin_heatmap::services::{obtain_session, Credentials, SessionSource, TokenStore};

mod common;
use common::{token, FakeApi};

fn credentials() -> Credentials {
    Credentials::new(
        Some("runner@example.com".to_string()),
        Some("hunter2".to_string()),
    )
}

#[tokio::test]
async fn test_cached_token_skips_login() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));
    store.save(&token("cached-token")).unwrap();

    let api = FakeApi::default();
    let session = obtain_session(&api, &store, &Credentials::default())
        .await
        .unwrap();

    assert_eq!(session.source, SessionSource::Cached);
    assert_eq!(session.token.access_token, "cached-token");
    assert_eq!(api.login_calls.get(), 0, "Login must not be attempted");
    assert_eq!(api.resume_calls.get(), 1);
}

#[tokio::test]
async fn test_missing_token_and_credentials_fails_before_network() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));

    let api = FakeApi::default();
    let err = obtain_session(&api, &store, &Credentials::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingCredentials));
    assert_eq!(api.network_calls(), 0);
}

#[tokio::test]
async fn test_login_persists_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tokens.json");
    let store = TokenStore::new(&path);

    let api = FakeApi::default();
    let session = obtain_session(&api, &store, &credentials()).await.unwrap();

    assert_eq!(session.source, SessionSource::Login);
    assert_eq!(api.login_calls.get(), 1);
    assert!(path.exists(), "Token file should be written after login");

    let reloaded = store.load().unwrap().expect("Token should round-trip");
    assert_eq!(reloaded, session.token);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[tokio::test]
async fn test_rejected_token_falls_back_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));
    store.save(&token("revoked-token")).unwrap();

    let api = FakeApi {
        reject_cached_token: true,
        ..FakeApi::default()
    };
    let session = obtain_session(&api, &store, &credentials()).await.unwrap();

    assert_eq!(session.source, SessionSource::Login);
    assert_eq!(session.token.access_token, "fresh-token");
    assert_eq!(
        store.load().unwrap().unwrap().access_token,
        "fresh-token",
        "Cache should hold the new token"
    );
}

#[tokio::test]
async fn test_rejected_token_without_credentials_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));
    store.save(&token("revoked-token")).unwrap();

    let api = FakeApi {
        reject_cached_token: true,
        ..FakeApi::default()
    };
    let err = obtain_session(&api, &store, &Credentials::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingCredentials));
    assert_eq!(api.login_calls.get(), 0);
}

#[tokio::test]
async fn test_expired_token_is_not_resumed() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("tokens.json"));
    let mut expired = token("old-token");
    expired.expires_at = Some(Utc::now() - chrono::Duration::hours(1));
    store.save(&expired).unwrap();

    let api = FakeApi::default();
    let session = obtain_session(&api, &store, &credentials()).await.unwrap();

    assert_eq!(session.source, SessionSource::Login);
    assert_eq!(api.resume_calls.get(), 0);
}

#[tokio::test]
async fn test_corrupt_token_file_is_treated_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "not json at all").unwrap();
    let store = TokenStore::new(&path);

    assert!(store.load().unwrap().is_none());

    let api = FakeApi::default();
    let err = obtain_session(&api, &store, &Credentials::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingCredentials));
}

#[test]
fn test_directory_token_path_uses_file_inside() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path());

    assert_eq!(store.path(), dir.path().join("oauth2_token.json"));
    store.save(&token("in-dir")).unwrap();
    assert_eq!(store.load().unwrap().unwrap().access_token, "in-dir");
}

#[cfg(unix)]
#[test]
fn test_save_restricts_existing_world_readable_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, "stale contents that are longer than a token").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = TokenStore::new(&path);
    store.save(&token("fresh")).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.load().unwrap().unwrap().access_token, "fresh");
}
