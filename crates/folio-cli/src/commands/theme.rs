//! Theme command handlers

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use folio_core::{Appearance, Config, FileStore, SettingsStore};

use crate::appearance;
use crate::output::Output;
use crate::theme_writer::ThemeWriter;

/// Print the directives derived from the current settings
pub fn show(storage: FileStore, config: &Config, output: &Output) -> Result<()> {
    let store = SettingsStore::open(storage, appearance::detect(config.appearance))?;
    output.print_directives(store.directives());
    Ok(())
}

/// Write `theme.css` and `head.html`
pub fn render(
    storage: FileStore,
    config: &Config,
    dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = SettingsStore::open(storage, appearance::detect(config.appearance))?;
    let writer = ThemeWriter::new(dir.unwrap_or_else(|| config.output_dir()));

    let (css, head) = writer.write(store.directives())?;
    output.success(&format!(
        "Rendered {} theme to {} and {}",
        store.directives().theme,
        css.display(),
        head.display()
    ));
    Ok(())
}

/// Re-render whenever the platform appearance or the stored settings change
pub async fn watch(
    storage: FileStore,
    config: &Config,
    dir: Option<PathBuf>,
    interval_secs: u64,
    output: &Output,
) -> Result<()> {
    let forced = config.appearance;
    let writer = ThemeWriter::new(dir.unwrap_or_else(|| config.output_dir()));
    let out_dir = writer.dir().to_path_buf();

    let mut store = SettingsStore::open(storage, detect_async(forced).await?)?;
    writer.write(store.directives())?;
    store.subscribe(move |change| writer.on_change(change));

    output.message(&format!(
        "Watching theme ({}), writing to {}. Press Ctrl-C to stop.",
        store.directives().theme,
        out_dir.display()
    ));
    info!(interval_secs, "Theme watch started");

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let platform = detect_async(forced).await?;
                if store.set_platform_appearance(platform) {
                    output.message(&format!("Appearance changed to {}; theme is now {}", platform, store.directives().theme));
                }

                // Pick up edits made by other commands
                match store.reload() {
                    Ok(true) => output.message("Settings changed; theme files updated"),
                    Ok(false) => {}
                    Err(e) => warn!("Could not reload settings: {:#}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Theme watch stopped");
                break;
            }
        }
    }

    Ok(())
}

async fn detect_async(forced: Option<Appearance>) -> Result<Appearance> {
    tokio::task::spawn_blocking(move || appearance::detect(forced))
        .await
        .context("Appearance detection failed")
}
