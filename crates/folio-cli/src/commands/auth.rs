//! Login, logout and session status

use anyhow::Result;
use tracing::warn;

use folio_core::{AuthStore, Config, Credentials, FileStore};

use crate::output::{Output, OutputFormat};
use crate::prompt::prompt_required;

pub fn login(
    storage: FileStore,
    config: &Config,
    username: Option<String>,
    password: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut auth = AuthStore::open(storage, Credentials::from_config(config))?;

    let username = match username {
        Some(u) => u,
        None => prompt_required("Username")?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt_required("Password")?,
    };

    let result = auth.login(&username, &password)?;
    if result.success {
        output.success(&format!("Logged in as {}", username));
        Ok(())
    } else {
        anyhow::bail!(result.error.unwrap_or_default())
    }
}

pub fn logout(storage: FileStore, config: &Config, output: &Output) -> Result<()> {
    let mut auth = AuthStore::open(storage, Credentials::from_config(config))?;
    if !auth.is_authenticated() {
        output.message("Not logged in.");
        return Ok(());
    }

    auth.logout()?;
    output.success("Logged out");
    Ok(())
}

/// Show the session and storage location
pub fn status(storage: FileStore, config: &Config, output: &Output) -> Result<()> {
    let data_dir = storage.dir().to_path_buf();
    let size = storage_size(&storage);
    let auth = AuthStore::open(storage, Credentials::from_config(config))?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "authenticated": auth.is_authenticated(),
                    "user": auth.user(),
                    "data_dir": data_dir,
                    "storage_size": size
                })
            );
        }
        OutputFormat::Quiet => {
            println!(
                "{}",
                auth.user().map(|u| u.username.as_str()).unwrap_or("")
            );
        }
        OutputFormat::Human => {
            println!("Folio Status");
            println!("============");
            println!();
            match auth.user() {
                Some(user) => {
                    println!("Session:");
                    println!("  User:      {} ({})", user.username, user.role);
                    println!(
                        "  Logged in: {}",
                        user.login_time.format("%Y-%m-%d %H:%M UTC")
                    );
                }
                None => println!("Session: not logged in"),
            }
            println!();
            println!("Storage:");
            println!("  Location: {}", data_dir.display());
            match size {
                Some(bytes) => println!("  Size:     {} bytes", bytes),
                None => println!("  Size:     unknown"),
            }
        }
    }

    Ok(())
}

/// Size of the stored entries, or `None` when the directory cannot be read
fn storage_size(storage: &FileStore) -> Option<u64> {
    match storage.total_size() {
        Ok(size) => Some(size),
        Err(e) => {
            warn!("Could not measure storage: {}", e);
            None
        }
    }
}
