use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;

/// The on-disk config file together with its parsed contents.
///
/// Token exchanges write the new pair back through [`ConfigStore::set_tokens`],
/// which also refreshes the file's modification time used for token aging.
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            config: Config::default(),
        }
    }

    /// Store around an already-built config (nothing is read from disk)
    pub fn with_config(path: PathBuf, config: Config) -> Self {
        Self { path, config }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&mut self) -> Result<()> {
        self.config = Config::load_from_file(&self.path)
            .with_context(|| format!("Error reading configuration file {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Loaded configuration");
        Ok(())
    }

    /// Load the file, or write a default one when it is missing.
    ///
    /// Returns `true` when a default file was created; its credentials are
    /// empty, so the caller cannot proceed until the user fills them in.
    pub fn load_or_create_default(&mut self) -> Result<bool> {
        if self.path.exists() {
            self.load()?;
            return Ok(false);
        }

        self.config = Config::default();
        self.save()
            .with_context(|| format!("Error writing configuration file {}", self.path.display()))?;
        info!("Default settings wrote to file {}", self.path.display());
        Ok(true)
    }

    pub fn save(&self) -> Result<()> {
        self.config.save_to_file(&self.path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Last modification time of the config file
    pub fn modified_at(&self) -> Result<DateTime<Utc>> {
        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .with_context(|| format!("Could not read modification time of {}", self.path.display()))?;
        Ok(DateTime::<Utc>::from(modified))
    }

    /// Replace the token pair and flush the file immediately
    pub fn set_tokens(&mut self, access_token: &str, refresh_token: &str) -> Result<()> {
        self.config.set_tokens(access_token, refresh_token);
        self.save()?;
        info!("Saved new access and refresh tokens to {}", self.path.display());
        Ok(())
    }
}
