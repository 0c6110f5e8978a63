//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/folio/config.toml)
//! 3. Environment variables (FOLIO_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::Appearance;

/// Environment variable prefix
const ENV_PREFIX: &str = "FOLIO";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the persisted key-value entries
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Where rendered `theme.css` / `head.html` and exports are written
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Optional log file (logs go to stderr when unset)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Dashboard username
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Dashboard password
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Forced platform appearance; detected from the desktop when unset
    #[serde(default)]
    pub appearance: Option<Appearance>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: None,
            log_file: None,
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            appearance: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (FOLIO_DATA_DIR, FOLIO_LOG_FILE, FOLIO_APPEARANCE)
    /// 2. Config file (~/.config/folio/config.toml or FOLIO_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // FOLIO_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // FOLIO_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // FOLIO_APPEARANCE
        if let Ok(val) = std::env::var(format!("{}_APPEARANCE", ENV_PREFIX)) {
            self.appearance = val.parse().ok();
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with FOLIO_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("config.toml")
    }

    /// Directory rendered files and exports are written to
    ///
    /// Falls back to `<data_dir>/site` when no output directory is configured.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("site"))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("folio")
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}
