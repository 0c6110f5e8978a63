//! Platform appearance detection
//!
//! A forced appearance (config file or `FOLIO_APPEARANCE`) wins; otherwise
//! the desktop setting is queried, and anything unreadable counts as light.

use std::process::Command;

use folio_core::Appearance;
use tracing::debug;

pub fn detect(forced: Option<Appearance>) -> Appearance {
    if let Some(appearance) = forced {
        return appearance;
    }

    let detected = desktop_appearance();
    debug!(?detected, "Queried desktop appearance");
    detected.unwrap_or_default()
}

#[cfg(target_os = "linux")]
fn desktop_appearance() -> Option<Appearance> {
    let output = Command::new("gsettings")
        .args(["get", "org.gnome.desktop.interface", "color-scheme"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    parse_gsettings(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(target_os = "macos")]
fn desktop_appearance() -> Option<Appearance> {
    let output = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()?;

    // The key is absent in light mode and the command fails
    Some(parse_apple_style(
        output.status.success(),
        &String::from_utf8_lossy(&output.stdout),
    ))
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn desktop_appearance() -> Option<Appearance> {
    None
}

/// Parse `gsettings get org.gnome.desktop.interface color-scheme`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_gsettings(output: &str) -> Option<Appearance> {
    match output.trim().trim_matches('\'') {
        "prefer-dark" => Some(Appearance::Dark),
        "prefer-light" | "default" => Some(Appearance::Light),
        _ => None,
    }
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_apple_style(found: bool, output: &str) -> Appearance {
    Appearance::from_prefers_dark(found && output.trim().eq_ignore_ascii_case("dark"))
}
