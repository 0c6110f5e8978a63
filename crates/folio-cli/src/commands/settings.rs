//! Settings command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use tracing::warn;

use folio_core::settings::{ColorScheme, Settings, Template};
use folio_core::{Config, FileStore, Patch, SettingsStore};

use super::{require_login, split_assignment};
use crate::appearance;
use crate::output::Output;
use crate::prompt::confirm;
use crate::theme_writer::ThemeWriter;

/// Open the settings store with theme files kept in sync
pub fn open_store(storage: FileStore, config: &Config) -> Result<SettingsStore<FileStore>> {
    let mut store = SettingsStore::open(storage, appearance::detect(config.appearance))?;

    let writer = ThemeWriter::new(config.output_dir());
    store.subscribe(move |change| writer.on_change(change));
    Ok(store)
}

pub fn show(storage: FileStore, config: &Config, key: Option<String>, output: &Output) -> Result<()> {
    let store = open_store(storage, config)?;

    if let Some(ref key) = key {
        if store.settings().get(key).is_none() {
            bail!("Unknown setting: '{}'", key);
        }
    }

    output.print_settings(store.settings(), key.as_deref());
    Ok(())
}

/// Apply `KEY=VALUE` assignments as one patch
pub fn set(
    storage: FileStore,
    config: &Config,
    assignments: Vec<String>,
    output: &Output,
) -> Result<()> {
    require_login(&storage, config)?;
    if assignments.is_empty() {
        bail!("Nothing to set. Usage: folio settings set KEY=VALUE...");
    }

    let patch = settings_patch(&assignments)?;
    let mut store = open_store(storage, config)?;
    store.update_settings(&patch)?;

    let keys: Vec<&str> = patch.keys().map(String::as_str).collect();
    output.success(&format!("Updated {}", keys.join(", ")));
    Ok(())
}

pub fn reset(storage: FileStore, config: &Config, yes: bool, output: &Output) -> Result<()> {
    require_login(&storage, config)?;

    if !yes && output.should_prompt() && !confirm("Reset all settings to defaults?")? {
        println!("Cancelled.");
        return Ok(());
    }

    let mut store = open_store(storage, config)?;
    store.reset_settings()?;
    output.success("Settings reset to defaults");
    Ok(())
}

pub fn template(storage: FileStore, config: &Config, name: String, output: &Output) -> Result<()> {
    require_login(&storage, config)?;
    let mut store = open_store(storage, config)?;

    let known = Template::find(&name).is_some();
    store.apply_template(&name)?;

    if known {
        output.success(&format!("Applied template: {}", name));
    } else {
        output.message(&format!("Unknown template '{}'; nothing changed.", name));
    }
    Ok(())
}

pub fn templates(storage: FileStore, config: &Config, output: &Output) -> Result<()> {
    let store = open_store(storage, config)?;
    output.print_templates(Template::all(), &store.settings().template);
    Ok(())
}

pub fn scheme(storage: FileStore, config: &Config, name: String, output: &Output) -> Result<()> {
    require_login(&storage, config)?;
    let mut store = open_store(storage, config)?;

    if !store.apply_color_scheme(&name)? {
        let names: Vec<&str> = ColorScheme::all().iter().map(|s| s.name).collect();
        bail!(
            "Unknown color scheme: '{}'\nAvailable: {}",
            name,
            names.join(", ")
        );
    }

    output.success(&format!("Applied color scheme: {}", name));
    Ok(())
}

pub fn schemes(storage: FileStore, config: &Config, output: &Output) -> Result<()> {
    let store = open_store(storage, config)?;
    output.print_schemes(ColorScheme::all(), &store.settings().color_scheme);
    Ok(())
}

pub fn export(
    storage: FileStore,
    config: &Config,
    dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = open_store(storage, config)?;
    let dir = dir.unwrap_or_else(|| config.output_dir());

    let path = store.export_to_dir(&dir)?;
    output.success(&format!("Exported settings to {}", path.display()));
    Ok(())
}

pub fn import(storage: FileStore, config: &Config, file: PathBuf, output: &Output) -> Result<()> {
    require_login(&storage, config)?;
    let text =
        fs::read_to_string(&file).with_context(|| format!("Failed to read {:?}", file))?;

    let mut store = open_store(storage, config)?;
    if !store.import_settings(&text) {
        bail!("Invalid settings file: {}", file.display());
    }

    output.success(&format!("Imported settings from {}", file.display()));
    Ok(())
}

/// Build a patch from `KEY=VALUE` pairs, typing each value after the field
/// it targets
fn settings_patch(assignments: &[String]) -> Result<Patch> {
    let defaults = Settings::default().to_map();
    let mut patch = Patch::new();

    for arg in assignments {
        let (key, raw) = split_assignment(arg)?;
        let value = parse_setting(&defaults, key, raw)?;
        patch.insert(key.to_string(), value);
    }
    Ok(patch)
}

fn parse_setting(defaults: &Map<String, Value>, key: &str, raw: &str) -> Result<Value> {
    match defaults.get(key) {
        Some(Value::Bool(_)) => match raw.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            other => bail!("{} expects true or false, got '{}'", key, other),
        },
        Some(Value::String(_)) => Ok(Value::String(raw.to_string())),
        Some(_) => serde_json::from_str(raw).with_context(|| format!("Invalid value for {}", key)),
        None => {
            warn!(key, "Storing unknown setting");
            Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
        }
    }
}
