//! Config command handlers

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use folio_core::{Appearance, Config};

use crate::output::{Output, OutputFormat};

const KEYS: &str = "data_dir, output_dir, log_file, admin_username, admin_password, appearance";

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "output_dir": config.output_dir(),
                    "log_file": config.log_file,
                    "admin_username": config.admin_username,
                    "appearance": config.appearance
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:       {}", config.data_dir.display());
            println!("  output_dir:     {}", config.output_dir().display());
            println!("  log_file:       {}", display_path(config.log_file.as_deref()));
            println!("  admin_username: {}", config.admin_username);
            println!("  admin_password: {}", "*".repeat(config.admin_password.len()));
            println!(
                "  appearance:     {}",
                config
                    .appearance
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "(detect)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    let shown = if key == "admin_password" { "********" } else { value.as_str() };
    output.success(&format!("Set {} = {}", key, shown));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            if value.is_empty() {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "output_dir" => config.output_dir = optional(value).map(PathBuf::from),
        "log_file" => config.log_file = optional(value).map(PathBuf::from),
        "admin_username" => config.admin_username = value.to_string(),
        "admin_password" => config.admin_password = value.to_string(),
        "appearance" => {
            config.appearance = match optional(value) {
                Some(v) => Some(v.parse::<Appearance>().map_err(anyhow::Error::msg)?),
                None => None,
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: {}",
                key,
                KEYS
            );
        }
    }
    Ok(())
}

/// Empty or `none` clears an optional value
fn optional(value: &str) -> Option<&str> {
    if value.is_empty() || value == "none" {
        None
    } else {
        Some(value)
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}
