use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraktError {
    #[error("No valid authentication parameters: {0}")]
    Configuration(String),
    #[error("Sorry, the authentication was not successful: {status} [{body}]")]
    Authentication { status: u16, body: String },
    #[error("Error fetching {target}: {status} [{body}]")]
    Fetch { target: String, status: u16, body: String },
    #[error("Error removing items from {target}: {status} [{body}]")]
    Removal { target: String, status: u16, body: String },
    #[error("Could not obtain an authorization code: {0}")]
    AuthorizationCode(String),
    #[error("Network request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl TraktError {
    /// Configuration and authentication failures end the run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TraktError::Configuration(_) | TraktError::Authentication { .. } | TraktError::AuthorizationCode(_)
        )
    }
}
