use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use trakt_export_models::{Credentials, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub trakt: TraktConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraktConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProxyConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_proxy_host")]
    pub host: String,
    #[serde(default = "default_proxy_port")]
    pub port: u16,
}

/// Transport settings handed to the HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(60),
            proxy_url: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_proxy_host() -> String {
    "https://127.0.0.1".to_string()
}

fn default_proxy_port() -> u16 {
    3128
}

impl Default for TraktConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            access_token: String::new(),
            refresh_token: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_proxy_host(),
            port: default_proxy_port(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Application credentials are mandatory; tokens are obtained on demand
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trakt.client_id.trim().is_empty() {
            return Err(anyhow::anyhow!("you must specify a trakt.tv client_id"));
        }
        if self.trakt.client_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("you must specify a trakt.tv client_secret"));
        }
        if self.proxy.enabled && self.proxy.host.trim().is_empty() {
            return Err(anyhow::anyhow!("proxy is enabled but no proxy host is set"));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.trakt.client_id.clone(), self.trakt.client_secret.clone())
            .with_tokens(self.trakt.access_token.clone(), self.trakt.refresh_token.clone())
            .with_base_url(self.trakt.base_url.clone())
    }

    pub fn set_tokens(&mut self, access_token: &str, refresh_token: &str) {
        self.trakt.access_token = access_token.to_string();
        self.trakt.refresh_token = refresh_token.to_string();
    }

    pub fn http_settings(&self) -> HttpSettings {
        if self.proxy.enabled {
            HttpSettings {
                connect_timeout: Duration::from_secs(10),
                timeout: Duration::from_secs(60),
                proxy_url: Some(format!("{}:{}", self.proxy.host, self.proxy.port)),
            }
        } else {
            HttpSettings::default()
        }
    }
}
