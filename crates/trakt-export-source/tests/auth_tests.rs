use chrono::{Duration, Utc};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use trakt_export_config::ConfigStore;
use trakt_export_models::Credentials;
use trakt_export_source::{create_trakt_client, CredentialManager, FixedCode, TokenStore, TraktError};

type TestResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Token store whose writes always fail
#[derive(Default)]
struct ReadOnlyStore {
    attempts: usize,
}

impl TokenStore for ReadOnlyStore {
    fn persist_tokens(&mut self, _access_token: &str, _refresh_token: &str) -> anyhow::Result<()> {
        self.attempts += 1;
        anyhow::bail!("disk full")
    }
}

fn store_in(dir: &tempfile::TempDir) -> TestResult<ConfigStore> {
    let mut store = ConfigStore::new(dir.path().join("config.toml"));
    store.load_or_create_default()?;
    Ok(store)
}

#[tokio::test]
async fn fresh_tokens_are_reused_without_a_token_call() -> TestResult<()> {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200);
        })
        .await;

    let dir = tempdir()?;
    let mut store = store_in(&dir)?;
    let http = create_trakt_client(&Default::default())?;
    let codes = FixedCode("unused".to_string());

    let mut creds = Credentials::new("client", "secret")
        .with_tokens("access", "refresh")
        .with_base_url(server.base_url());
    let now = Utc::now();

    let mut manager = CredentialManager::new(&http, &codes, &mut store);
    let headers = manager
        .ensure_authenticated_at(&mut creds, now - Duration::days(10), now)
        .await?;

    assert_eq!(headers.masked_token(), "******");
    assert_eq!(creds.access_token, "access");
    token_mock.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test]
async fn old_tokens_are_refreshed_and_saved() -> TestResult<()> {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .body_contains("\"grant_type\":\"refresh_token\"")
                .body_contains("\"refresh_token\":\"old_refresh\"");
            then.status(200).json_body(json!({
                "access_token": "new_access",
                "refresh_token": "new_refresh",
                "expires_in": 7776000,
                "token_type": "bearer"
            }));
        })
        .await;

    let dir = tempdir()?;
    let path = dir.path().join("config.toml");
    let mut store = store_in(&dir)?;
    let http = create_trakt_client(&Default::default())?;
    let codes = FixedCode("unused".to_string());

    let mut creds = Credentials::new("client", "secret")
        .with_tokens("old_access", "old_refresh")
        .with_base_url(server.base_url());
    let now = Utc::now();

    let mut manager = CredentialManager::new(&http, &codes, &mut store);
    manager
        .ensure_authenticated_at(&mut creds, now - Duration::days(45), now)
        .await?;

    token_mock.assert_hits_async(1).await;
    assert_eq!(creds.access_token, "new_access");
    assert_eq!(creds.refresh_token, "new_refresh");

    let mut reloaded = ConfigStore::new(path);
    reloaded.load()?;
    assert_eq!(reloaded.config().trakt.access_token, "new_access");
    assert_eq!(reloaded.config().trakt.refresh_token, "new_refresh");
    Ok(())
}

#[tokio::test]
async fn missing_tokens_run_the_code_exchange() -> TestResult<()> {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .body_contains("\"grant_type\":\"authorization_code\"")
                .body_contains("\"code\":\"ABCD1234\"");
            then.status(200).json_body(json!({
                "access_token": "first_access",
                "refresh_token": "first_refresh"
            }));
        })
        .await;

    let dir = tempdir()?;
    let mut store = store_in(&dir)?;
    let http = create_trakt_client(&Default::default())?;
    let codes = FixedCode("  ABCD1234\n".to_string());

    let mut creds = Credentials::new("client", "secret").with_base_url(server.base_url());
    let now = Utc::now();

    let mut manager = CredentialManager::new(&http, &codes, &mut store);
    manager.ensure_authenticated_at(&mut creds, now, now).await?;

    token_mock.assert_async().await;
    assert_eq!(creds.access_token, "first_access");
    assert_eq!(store.config().trakt.refresh_token, "first_refresh");
    Ok(())
}

#[tokio::test]
async fn rejected_token_exchange_is_fatal() -> TestResult<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(401).body("{\"error\":\"invalid_grant\"}");
        })
        .await;

    let dir = tempdir()?;
    let mut store = store_in(&dir)?;
    let http = create_trakt_client(&Default::default())?;
    let codes = FixedCode("unused".to_string());

    let mut creds = Credentials::new("client", "secret")
        .with_tokens("old_access", "old_refresh")
        .with_base_url(server.base_url());
    let now = Utc::now();

    let mut manager = CredentialManager::new(&http, &codes, &mut store);
    let err = manager
        .ensure_authenticated_at(&mut creds, now - Duration::days(31), now)
        .await
        .unwrap_err();

    assert!(err.is_fatal());
    match err {
        TraktError::Authentication { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("expected an authentication error, got {other:?}"),
    }
    assert_eq!(creds.access_token, "old_access");
    Ok(())
}

#[tokio::test]
async fn empty_authorization_code_is_rejected() -> TestResult<()> {
    let dir = tempdir()?;
    let mut store = store_in(&dir)?;
    let http = create_trakt_client(&Default::default())?;
    let codes = FixedCode("   ".to_string());

    let mut creds = Credentials::new("client", "secret").with_base_url("http://127.0.0.1:9");
    let now = Utc::now();

    let mut manager = CredentialManager::new(&http, &codes, &mut store);
    let err = manager.ensure_authenticated_at(&mut creds, now, now).await.unwrap_err();
    assert!(matches!(err, TraktError::AuthorizationCode(_)));
    Ok(())
}

#[tokio::test]
async fn failed_token_save_keeps_the_session() -> TestResult<()> {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .body_contains("\"grant_type\":\"refresh_token\"");
            then.status(200).json_body(json!({
                "access_token": "new_access",
                "refresh_token": "new_refresh"
            }));
        })
        .await;

    let mut store = ReadOnlyStore::default();
    let http = create_trakt_client(&Default::default())?;
    let codes = FixedCode("unused".to_string());

    let mut creds = Credentials::new("client", "secret")
        .with_tokens("old_access", "old_refresh")
        .with_base_url(server.base_url());
    let now = Utc::now();

    let headers = {
        let mut manager = CredentialManager::new(&http, &codes, &mut store);
        manager
            .ensure_authenticated_at(&mut creds, now - Duration::days(45), now)
            .await?
    };

    token_mock.assert_async().await;
    assert_eq!(store.attempts, 1);
    assert_eq!(creds.access_token, "new_access");
    assert_eq!(creds.refresh_token, "new_refresh");
    assert_eq!(headers.masked_token(), "new_…cess");
    Ok(())
}
