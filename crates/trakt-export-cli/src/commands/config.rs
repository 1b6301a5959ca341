use super::session::config_path;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;
use trakt_export_config::{Config, ConfigStore};

pub fn run_config(cmd: ConfigCommands, config: Option<PathBuf>, output: &Output) -> Result<()> {
    let path = config_path(config);
    match cmd {
        ConfigCommands::Init { force } => init_config(path, force, output),
        ConfigCommands::Show { full } => show_config(path, full, output),
    }
}

fn init_config(path: PathBuf, force: bool, output: &Output) -> Result<()> {
    if path.exists() && !force {
        output.warn(format!(
            "Configuration file already exists at {} (use --force to overwrite)",
            path.display()
        ));
        return Ok(());
    }

    let store = ConfigStore::with_config(path, Config::default());
    store.save().map_err(|e| eyre!("{:#}", e))?;
    output.success(format!("Default settings wrote to {}", store.path().display()));
    output.info("Add your trakt.tv client_id and client_secret, then run 'trakt-export export'.");
    Ok(())
}

fn show_config(path: PathBuf, full: bool, output: &Output) -> Result<()> {
    if !path.exists() {
        output.warn(format!("Configuration file not found at: {}", path.display()));
        output.info("Run 'trakt-export config init' to create one.");
        return Ok(());
    }

    let mut store = ConfigStore::new(path);
    store.load().map_err(|e| eyre!("{:#}", e))?;
    let config = store.config();
    let secret = |s: &str| if full { s.to_string() } else { mask_string(s) };

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Config File").add_attribute(Attribute::Bold),
                Cell::new(store.path().display().to_string()),
            ]);
            table.add_row(vec![
                Cell::new("Trakt").fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new(""),
            ]);
            table.add_row(vec![Cell::new("Client ID"), Cell::new(secret(&config.trakt.client_id))]);
            table.add_row(vec![Cell::new("Client Secret"), Cell::new(secret(&config.trakt.client_secret))]);
            table.add_row(vec![Cell::new("Access Token"), Cell::new(secret(&config.trakt.access_token))]);
            table.add_row(vec![Cell::new("Refresh Token"), Cell::new(secret(&config.trakt.refresh_token))]);
            table.add_row(vec![Cell::new("Base URL"), Cell::new(&config.trakt.base_url)]);
            table.add_row(vec![
                Cell::new("Proxy").fg(Color::Cyan).add_attribute(Attribute::Bold),
                Cell::new(""),
            ]);
            table.add_row(vec![
                Cell::new("Enabled"),
                Cell::new(if config.proxy.enabled {
                    "✓".green().to_string()
                } else {
                    "✗".red().to_string()
                }),
            ]);
            table.add_row(vec![
                Cell::new("Address"),
                Cell::new(format!("{}:{}", config.proxy.host, config.proxy.port)),
            ]);
            if let Ok(modified) = store.modified_at() {
                table.add_row(vec![Cell::new("Last Written"), Cell::new(modified.to_rfc3339())]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);

            if let Err(e) = config.validate() {
                output.warn(format!("Configuration incomplete: {}", e));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": store.path().display().to_string(),
                "trakt": {
                    "client_id": secret(&config.trakt.client_id),
                    "client_secret": secret(&config.trakt.client_secret),
                    "access_token": secret(&config.trakt.access_token),
                    "refresh_token": secret(&config.trakt.refresh_token),
                    "base_url": config.trakt.base_url,
                },
                "proxy": {
                    "enabled": config.proxy.enabled,
                    "host": config.proxy.host,
                    "port": config.proxy.port,
                },
                "valid": config.validate().is_ok(),
            }));
        }
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string(""), "<not set>");
        assert_eq!(mask_string("abc"), "***");
        assert_eq!(mask_string("abcdefgh"), "ab***gh");
    }
}
