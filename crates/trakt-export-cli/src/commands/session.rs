use super::prompts::ConsoleCodeProvider;
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::path::PathBuf;
use trakt_export_config::{ConfigStore, PathManager};
use trakt_export_source::{create_trakt_client, CredentialManager, TraktClient};

/// Config file in use: `--config`, else the default location
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| PathManager::default().config_file())
}

/// Load the config file. A missing file is replaced by a default one and the
/// run stops, since its credentials are empty.
pub fn load_store(path: PathBuf) -> Result<ConfigStore> {
    let mut store = ConfigStore::new(path);
    let created = store
        .load_or_create_default()
        .map_err(|e| eyre!("{:#}", e))?;

    if created {
        return Err(eyre!(
            "Default settings wrote to {}, please add your trakt.tv client_id and client_secret",
            store.path().display()
        ));
    }

    store
        .config()
        .validate()
        .map_err(|e| eyre!("No valid authentication parameters in {}: {}", store.path().display(), e))?;
    Ok(store)
}

/// Authenticate and build the API client. New tokens are written back to the
/// config file.
pub async fn connect(config: Option<PathBuf>, output: &Output) -> Result<TraktClient> {
    let mut store = load_store(config_path(config))?;

    let settings = store.config().http_settings();
    let mut creds = store.config().credentials();
    let modified = store
        .modified_at()
        .map_err(|e| eyre!("{:#}", e))?;

    let http = create_trakt_client(&settings).wrap_err("Failed to build the HTTP client")?;
    let codes = ConsoleCodeProvider::new(output);

    let headers = {
        let mut manager = CredentialManager::new(&http, &codes, &mut store);
        manager.ensure_authenticated(&mut creds, modified).await?
    };

    Ok(TraktClient::new(http, creds.api_base(), headers))
}
