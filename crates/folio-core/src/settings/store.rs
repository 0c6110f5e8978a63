//! Settings store
//!
//! Holds the current settings record, persists it after every change and
//! re-derives the style directives. Listeners subscribed with
//! [`SettingsStore::subscribe`] receive every change, including the ones
//! caused only by the platform appearance flipping while the theme mode is
//! `auto`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::presets::{template_patch, ColorScheme};
use super::{Settings, ThemeMode};
use crate::patch::Patch;
use crate::storage::{keys, KeyValueStore};
use crate::theme::{apply_theme, Appearance, StyleDirectives};

/// File name used when exporting settings
pub const EXPORT_FILE_NAME: &str = "portfolio-settings.json";

/// Notification sent to listeners after styles were re-applied
pub struct SettingsChange<'a> {
    pub settings: &'a Settings,
    pub directives: &'a StyleDirectives,
}

type Listener = Box<dyn FnMut(&SettingsChange<'_>)>;

/// Settings record backed by a key-value store
pub struct SettingsStore<S: KeyValueStore> {
    storage: S,
    settings: Settings,
    platform: Appearance,
    directives: StyleDirectives,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Load settings from storage, falling back to defaults
    ///
    /// A stored record that cannot be parsed is ignored; it is overwritten
    /// by the next save.
    pub fn open(storage: S, platform: Appearance) -> Result<Self> {
        let settings = load(&storage)?;
        let directives = apply_theme(&settings, platform);

        Ok(Self {
            storage,
            settings,
            platform,
            directives,
            listeners: Vec::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Directives derived from the current settings
    pub fn directives(&self) -> &StyleDirectives {
        &self.directives
    }

    pub fn platform(&self) -> Appearance {
        self.platform
    }

    /// Register a listener for settings changes
    pub fn subscribe(&mut self, listener: impl FnMut(&SettingsChange<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Shallow-merge `patch` into the settings and persist the result
    pub fn update_settings(&mut self, patch: &Patch) -> Result<()> {
        let merged = self
            .settings
            .merged(patch)
            .context("Invalid settings patch")?;
        self.persist(&merged)?;

        debug!(keys = ?patch.keys().collect::<Vec<_>>(), "Updated settings");
        self.settings = merged;
        self.apply_styles();
        Ok(())
    }

    /// Restore the defaults and forget the persisted copy
    pub fn reset_settings(&mut self) -> Result<()> {
        self.storage
            .remove(keys::SETTINGS)
            .context("Failed to clear stored settings")?;

        info!("Reset settings to defaults");
        self.settings = Settings::default();
        self.apply_styles();
        Ok(())
    }

    /// Apply a named template; unknown names apply an empty patch
    pub fn apply_template(&mut self, name: &str) -> Result<()> {
        let patch = template_patch(name);
        if patch.is_empty() {
            warn!(template = name, "Unknown template");
        }
        self.update_settings(&patch)
    }

    /// Apply a named color scheme
    ///
    /// Returns `false` (and changes nothing) for an unknown scheme.
    pub fn apply_color_scheme(&mut self, name: &str) -> Result<bool> {
        let Some(scheme) = ColorScheme::find(name) else {
            warn!(scheme = name, "Unknown color scheme");
            return Ok(false);
        };

        let mut patch = Patch::new();
        patch.insert("colorScheme".to_string(), scheme.name.into());
        patch.insert("primaryColor".to_string(), scheme.primary.into());
        patch.insert("secondaryColor".to_string(), scheme.secondary.into());
        patch.insert("accentColor".to_string(), scheme.accent.into());

        self.update_settings(&patch)?;
        Ok(true)
    }

    /// Current settings as indented JSON
    pub fn export_settings(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.settings).context("Failed to serialize settings")
    }

    /// Write the export to `portfolio-settings.json` inside `dir`
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(EXPORT_FILE_NAME);
        let json = self.export_settings()?;

        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
        fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

        info!(path = %path.display(), "Exported settings");
        Ok(path)
    }

    /// Replace the settings with an imported record merged onto the defaults
    ///
    /// Returns `false` without touching the current settings when the text
    /// is not a valid settings record or cannot be persisted.
    pub fn import_settings(&mut self, json: &str) -> bool {
        let imported = match Settings::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to import settings: {}", e);
                return false;
            }
        };

        if let Err(e) = self.persist(&imported) {
            warn!("Failed to store imported settings: {:#}", e);
            return false;
        }

        info!("Imported settings");
        self.settings = imported;
        self.apply_styles();
        true
    }

    /// Pick up a record written by another process
    ///
    /// Nothing is written back. Returns whether the settings changed, in
    /// which case styles are re-applied.
    pub fn reload(&mut self) -> Result<bool> {
        let stored = load(&self.storage)?;
        if stored == self.settings {
            return Ok(false);
        }

        debug!("Reloaded changed settings");
        self.settings = stored;
        self.apply_styles();
        Ok(true)
    }

    /// Record a change of the platform appearance
    ///
    /// Styles are re-applied only when the theme mode is `auto` and the
    /// appearance actually changed. Returns whether that happened.
    pub fn set_platform_appearance(&mut self, platform: Appearance) -> bool {
        if platform == self.platform {
            return false;
        }
        self.platform = platform;

        if self.settings.theme_mode != ThemeMode::Auto {
            return false;
        }

        debug!(%platform, "Platform appearance changed");
        self.apply_styles();
        true
    }

    pub fn set_prefers_dark(&mut self, prefers_dark: bool) -> bool {
        self.set_platform_appearance(Appearance::from_prefers_dark(prefers_dark))
    }

    fn persist(&mut self, settings: &Settings) -> Result<()> {
        self.storage
            .set_json(keys::SETTINGS, settings)
            .context("Failed to store settings")
    }

    fn apply_styles(&mut self) {
        self.directives = apply_theme(&self.settings, self.platform);

        let change = SettingsChange {
            settings: &self.settings,
            directives: &self.directives,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
    }
}

fn load<S: KeyValueStore>(storage: &S) -> Result<Settings> {
    let settings = match storage.get(keys::SETTINGS).context("Failed to read settings")? {
        Some(raw) => Settings::from_json(&raw).unwrap_or_else(|e| {
            warn!("Stored settings are unreadable, using defaults: {}", e);
            Settings::default()
        }),
        None => Settings::default(),
    };
    Ok(settings)
}
