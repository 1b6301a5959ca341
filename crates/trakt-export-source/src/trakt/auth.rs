use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};
use trakt_export_config::ConfigStore;
use trakt_export_models::Credentials;
use urlencoding::encode;

use crate::error::TraktError;

pub const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
pub const API_VERSION: &str = "2";

/// Tokens older than this (by config file age) are refreshed before use
pub const TOKEN_MAX_AGE_DAYS: i64 = 30;

/// Supplies the code the user copies from the authorization page
pub trait AuthCodeProvider {
    fn authorization_code(&self, authorize_url: &str) -> anyhow::Result<String>;
}

/// Hands out a preset code; used for scripted runs and tests
pub struct FixedCode(pub String);

impl AuthCodeProvider for FixedCode {
    fn authorization_code(&self, _authorize_url: &str) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

/// Durable home of the token pair
pub trait TokenStore {
    fn persist_tokens(&mut self, access_token: &str, refresh_token: &str) -> anyhow::Result<()>;
}

impl TokenStore for ConfigStore {
    fn persist_tokens(&mut self, access_token: &str, refresh_token: &str) -> anyhow::Result<()> {
        self.set_tokens(access_token, refresh_token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// No tokens yet: run the authorization-code exchange
    Authorize,
    /// Tokens are fresh enough to use as-is
    Reuse,
    /// Tokens are old: run the refresh-token exchange
    Refresh,
}

/// Pick the token action for `creds`, given when the config was last written
pub fn decide_action(
    creds: &Credentials,
    config_modified: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<AuthAction, TraktError> {
    if !creds.has_application() {
        return Err(TraktError::Configuration(
            "client_id and client_secret are required".to_string(),
        ));
    }

    if creds.has_no_tokens() {
        return Ok(AuthAction::Authorize);
    }

    if creds.has_tokens() {
        let age = now - config_modified;
        if age < Duration::days(TOKEN_MAX_AGE_DAYS) {
            return Ok(AuthAction::Reuse);
        }
        return Ok(AuthAction::Refresh);
    }

    Err(TraktError::Configuration(
        "only one of access_token and refresh_token is set".to_string(),
    ))
}

/// Headers every API call carries
#[derive(Clone)]
pub struct AuthHeaders {
    access_token: String,
    client_id: String,
}

impl AuthHeaders {
    pub fn from_credentials(creds: &Credentials) -> Result<Self, TraktError> {
        if !creds.can_call_api() {
            return Err(TraktError::Configuration(
                "no valid Authorization header".to_string(),
            ));
        }
        Ok(Self {
            access_token: creds.access_token.clone(),
            client_id: creds.client_id.clone(),
        })
    }

    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("trakt-api-version", API_VERSION)
            .header("trakt-api-key", &self.client_id)
            .header("Authorization", format!("Bearer {}", self.access_token))
    }

    pub fn masked_token(&self) -> String {
        mask(&self.access_token)
    }
}

impl std::fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("access_token", &self.masked_token())
            .field("client_id", &mask(&self.client_id))
            .finish()
    }
}

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Page the user opens to approve the application, derived from the API base
/// (`https://api.trakt.tv` authorizes on `https://trakt.tv`)
pub fn authorize_url(creds: &Credentials) -> String {
    let base = creds.api_base();
    let site = match base.split_once("://") {
        Some((scheme, host)) => {
            let host = host
                .strip_prefix("api.")
                .or_else(|| host.strip_prefix("api-"))
                .unwrap_or(host);
            format!("{}://{}", scheme, host)
        }
        None => base.to_string(),
    };
    format!(
        "{}/oauth/authorize?response_type=code&client_id={}&redirect_uri={}",
        site,
        encode(&creds.client_id),
        encode(REDIRECT_URI)
    )
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Owns the decision between reusing, refreshing and acquiring tokens, and
/// writes any new pair back to the token store.
pub struct CredentialManager<'a> {
    http: &'a Client,
    codes: &'a dyn AuthCodeProvider,
    store: &'a mut dyn TokenStore,
}

impl<'a> CredentialManager<'a> {
    pub fn new(http: &'a Client, codes: &'a dyn AuthCodeProvider, store: &'a mut dyn TokenStore) -> Self {
        Self { http, codes, store }
    }

    pub async fn ensure_authenticated(
        &mut self,
        creds: &mut Credentials,
        config_modified: DateTime<Utc>,
    ) -> Result<AuthHeaders, TraktError> {
        self.ensure_authenticated_at(creds, config_modified, Utc::now()).await
    }

    pub async fn ensure_authenticated_at(
        &mut self,
        creds: &mut Credentials,
        config_modified: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<AuthHeaders, TraktError> {
        let age = now - config_modified;
        match decide_action(creds, config_modified, now)? {
            AuthAction::Authorize => {
                info!("Trakt, no token found in config file, requesting authorization_code");
                self.authorize(creds).await?;
            }
            AuthAction::Reuse => {
                info!(
                    "Trakt, skipped access token refresh, token is less than {} days old ({} days)",
                    TOKEN_MAX_AGE_DAYS,
                    age.num_days()
                );
            }
            AuthAction::Refresh => {
                info!(
                    "Trakt, access token refresh, token is more than {} days old ({} days)",
                    TOKEN_MAX_AGE_DAYS,
                    age.num_days()
                );
                self.refresh(creds).await?;
            }
        }

        let headers = AuthHeaders::from_credentials(creds)?;
        debug!(token = %headers.masked_token(), "Authorization header ready");
        Ok(headers)
    }

    async fn authorize(&mut self, creds: &mut Credentials) -> Result<(), TraktError> {
        let url = authorize_url(creds);
        let code = self
            .codes
            .authorization_code(&url)
            .map_err(|e| TraktError::AuthorizationCode(e.to_string()))?;
        let code = code.trim();
        if code.is_empty() {
            return Err(TraktError::AuthorizationCode(
                "authorization code cannot be empty".to_string(),
            ));
        }

        let payload = serde_json::json!({
            "code": code,
            "client_id": creds.client_id,
            "client_secret": creds.client_secret,
            "redirect_uri": REDIRECT_URI,
            "grant_type": "authorization_code"
        });
        self.exchange(creds, payload).await
    }

    async fn refresh(&mut self, creds: &mut Credentials) -> Result<(), TraktError> {
        let payload = serde_json::json!({
            "refresh_token": creds.refresh_token,
            "client_id": creds.client_id,
            "client_secret": creds.client_secret,
            "redirect_uri": REDIRECT_URI,
            "grant_type": "refresh_token"
        });
        self.exchange(creds, payload).await
    }

    async fn exchange(&mut self, creds: &mut Credentials, payload: serde_json::Value) -> Result<(), TraktError> {
        let url = format!("{}/oauth/token", creds.api_base());
        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(TraktError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let token_response: TokenResponse = response.json().await?;
        info!("Authentication successful");
        if let Some(expires_in) = token_response.expires_in {
            debug!(expires_in, "Token lifetime reported by the service");
        }

        creds.access_token = token_response.access_token;
        creds.refresh_token = token_response.refresh_token;

        // The in-memory session keeps working even if the write fails
        if let Err(e) = self.store.persist_tokens(&creds.access_token, &creds.refresh_token) {
            warn!("Could not save the new tokens to the configuration: {:#}", e);
        }
        Ok(())
    }
}
