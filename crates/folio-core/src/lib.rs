//! Folio Core Library
//!
//! This crate provides the core of Folio, a local-first portfolio site
//! editor: the site owner logs in, edits the displayed content and tunes
//! the theme, and every change is written to a local key-value store.
//!
//! # Architecture
//!
//! - **Storage**: a key-value store holding one JSON value per key
//! - **Stores**: auth, settings and content each own their slice of state
//!   and rewrite it in full on every change
//! - **Theme**: a pure function turning settings into style directives
//!   (CSS variables, class toggles, document head); writing them anywhere
//!   is left to the caller
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let storage = FileStore::open(&config.data_dir)?;
//!
//! let mut settings = SettingsStore::open(storage.clone(), Appearance::Light)?;
//! settings.apply_template("minimal")?;
//! let css = settings.directives().to_stylesheet();
//! ```
//!
//! # Modules
//!
//! - `auth`: login/logout against the configured credential pair
//! - `settings`: settings record, presets and the settings store
//! - `theme`: style derivation
//! - `content`: content document, sections and the content store
//! - `storage`: key-value backends
//! - `patch`: shallow JSON patches
//! - `config`: application configuration

pub mod auth;
pub mod config;
pub mod content;
pub mod patch;
pub mod settings;
pub mod storage;
pub mod theme;

pub use auth::{AuthStore, AuthUser, Credentials, LoginResult};
pub use config::Config;
pub use content::{ContentDocument, ContentError, ContentStore, ListSection, ScalarSection, Section};
pub use patch::Patch;
pub use settings::{Settings, SettingsStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use theme::{apply_theme, Appearance, StyleDirectives};
