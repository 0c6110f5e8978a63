//! Writes derived style directives to disk
//!
//! `theme.css` carries the custom properties, body overrides and custom
//! stylesheet; `head.html` carries the title, favicon, meta tags and a
//! snippet setting the root classes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use folio_core::settings::SettingsChange;
use folio_core::StyleDirectives;

pub const STYLESHEET_FILE: &str = "theme.css";
pub const HEAD_FILE: &str = "head.html";

pub struct ThemeWriter {
    dir: PathBuf,
}

impl ThemeWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write both files, returning their paths
    pub fn write(&self, directives: &StyleDirectives) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory {:?}", self.dir))?;

        let css_path = self.dir.join(STYLESHEET_FILE);
        let head_path = self.dir.join(HEAD_FILE);

        fs::write(&css_path, directives.to_stylesheet())
            .with_context(|| format!("Failed to write {:?}", css_path))?;
        fs::write(&head_path, directives.to_head_html())
            .with_context(|| format!("Failed to write {:?}", head_path))?;

        info!(dir = %self.dir.display(), theme = %directives.theme, "Wrote theme files");
        Ok((css_path, head_path))
    }

    /// Settings listener: rewrite the files on every change
    pub fn on_change(&self, change: &SettingsChange<'_>) {
        if let Err(e) = self.write(change.directives) {
            warn!("Failed to write theme files: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::settings::Settings;
    use folio_core::{apply_theme, Appearance};
    use tempfile::TempDir;

    #[test]
    fn test_write_theme_files() {
        let temp = TempDir::new().unwrap();
        let writer = ThemeWriter::new(temp.path().join("site"));

        let directives = apply_theme(&Settings::default(), Appearance::Dark);
        let (css, head) = writer.write(&directives).unwrap();

        let css = fs::read_to_string(css).unwrap();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--primary-color: #8b5cf6;"));

        let head = fs::read_to_string(head).unwrap();
        assert!(head.contains("<title>Portfolio - Professional Portfolio</title>"));
    }
}
