//! Dashboard authentication
//!
//! A single configured username/password pair guards the dashboard. This is
//! not a security boundary: the token is a plain base64 encoding of the
//! credentials and a timestamp, and a session counts as authenticated as
//! soon as both the token and the user record are present in storage.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::storage::{keys, KeyValueStore};

/// Message returned for any credential mismatch
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Role assigned to every logged-in user
pub const ADMIN_ROLE: &str = "admin";

/// The username/password pair accepted by `login`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.admin_username, &config.admin_password)
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "admin123")
    }
}

/// Persisted record of the logged-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub username: String,
    pub role: String,
    pub login_time: DateTime<Utc>,
}

/// Outcome of a login attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoginResult {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(reason: &str) -> Self {
        Self {
            success: false,
            error: Some(reason.to_string()),
        }
    }
}

/// Authentication state backed by a key-value store
pub struct AuthStore<S: KeyValueStore> {
    storage: S,
    credentials: Credentials,
    user: Option<AuthUser>,
}

impl<S: KeyValueStore> AuthStore<S> {
    /// Restore the session from storage
    ///
    /// The stored token is not inspected; both entries being present is
    /// enough to count as logged in.
    pub fn open(storage: S, credentials: Credentials) -> Result<Self> {
        let has_token = storage
            .contains(keys::AUTH_TOKEN)
            .context("Failed to read auth token")?;

        let user = if has_token {
            match storage.get_json::<AuthUser>(keys::USER_DATA) {
                Ok(user) => user,
                Err(e) => {
                    warn!("Ignoring unreadable user record: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            storage,
            credentials,
            user,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    /// Check credentials and start a session
    ///
    /// A mismatch is reported in the result, not as an error. Errors are
    /// reserved for storage failures.
    pub fn login(&mut self, username: &str, password: &str) -> Result<LoginResult> {
        if !self.credentials.matches(username, password) {
            info!(username, "Rejected login");
            return Ok(LoginResult::failed(INVALID_CREDENTIALS));
        }

        let now = Utc::now();
        let token = encode_token(username, password, now);
        let user = AuthUser {
            username: username.to_string(),
            role: ADMIN_ROLE.to_string(),
            login_time: now,
        };

        self.storage
            .set_json(keys::AUTH_TOKEN, &token)
            .context("Failed to store auth token")?;
        self.storage
            .set_json(keys::USER_DATA, &user)
            .context("Failed to store user record")?;

        info!(username, "Logged in");
        self.user = Some(user);
        Ok(LoginResult::ok())
    }

    /// End the session and clear the persisted entries
    pub fn logout(&mut self) -> Result<()> {
        self.storage
            .remove(keys::AUTH_TOKEN)
            .context("Failed to remove auth token")?;
        self.storage
            .remove(keys::USER_DATA)
            .context("Failed to remove user record")?;

        if let Some(user) = self.user.take() {
            info!(username = %user.username, "Logged out");
        }
        Ok(())
    }
}

/// Reversible session token: base64 of `username:password:millis`
fn encode_token(username: &str, password: &str, at: DateTime<Utc>) -> String {
    STANDARD.encode(format!("{}:{}:{}", username, password, at.timestamp_millis()))
}
