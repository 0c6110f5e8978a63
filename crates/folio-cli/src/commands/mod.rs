//! Command handlers

pub mod auth;
pub mod config;
pub mod content;
pub mod settings;
pub mod theme;

use anyhow::{bail, Context, Result};

use folio_core::{AuthStore, Config, Credentials, FileStore};

/// Fail unless a dashboard session is active
pub fn require_login(storage: &FileStore, config: &Config) -> Result<()> {
    let auth = AuthStore::open(storage.clone(), Credentials::from_config(config))
        .context("Failed to read session")?;

    if !auth.is_authenticated() {
        bail!("Not logged in. Run `folio login` first.");
    }
    Ok(())
}

/// Split `KEY=VALUE`; the value may be empty or contain further `=`
pub fn split_assignment(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("Expected KEY=VALUE, got '{}'", arg),
    }
}
