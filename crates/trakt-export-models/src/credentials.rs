use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.trakt.tv";

/// OAuth application credentials plus the current token pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            access_token: String::new(),
            refresh_token: String::new(),
            base_url: default_base_url(),
        }
    }

    pub fn with_tokens(mut self, access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        self.access_token = access_token.into();
        self.refresh_token = refresh_token.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_application(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    pub fn has_tokens(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }

    pub fn has_no_tokens(&self) -> bool {
        self.access_token.is_empty() && self.refresh_token.is_empty()
    }

    /// API calls need both a bearer token and the api key
    pub fn can_call_api(&self) -> bool {
        !self.access_token.is_empty() && !self.client_id.is_empty()
    }

    /// Base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
