//! Site settings
//!
//! A flat record of named options controlling branding, theme, typography,
//! layout, animation, component visibility and accessibility. Every field has
//! a default and the record is always deserialized on top of those defaults,
//! so a stored or imported record with missing keys is still complete. Keys
//! the record does not know about are kept in `extra` and survive a
//! round-trip.

pub mod options;
pub mod presets;
pub mod store;

pub use options::{
    AnimationSpeed, ContainerWidth, FontFamily, FontSize, FontWeight, LayoutKind, LineHeight,
    LogoPosition, LogoSize, NavigationStyle, Spacing, ThemeMode,
};
pub use presets::{ColorScheme, Template};
pub use store::{SettingsChange, SettingsStore};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::patch::{self, Patch};

/// The site settings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // Branding & identity
    pub site_name: String,
    pub site_tagline: String,
    pub site_description: String,
    pub logo_url: String,
    pub favicon_url: String,
    pub logo_text: String,
    pub show_logo_text: bool,
    pub logo_position: LogoPosition,
    pub logo_size: LogoSize,

    // SEO & meta
    pub meta_keywords: String,
    pub meta_author: String,
    pub social_image: String,
    pub twitter_handle: String,

    // Template & layout
    pub template: String,
    pub layout: LayoutKind,
    pub navigation: NavigationStyle,

    pub theme_mode: ThemeMode,

    // Colors
    pub color_scheme: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub light_background_color: String,
    pub dark_background_color: String,

    // Typography
    pub font_family: FontFamily,
    pub font_size: FontSize,
    pub font_weight: FontWeight,
    pub line_height: LineHeight,

    // Animations
    pub animations_enabled: bool,
    pub animation_speed: AnimationSpeed,
    pub reduced_motion: bool,
    pub particle_effects: bool,
    pub hover_effects: bool,

    // Component visibility
    pub show_particles: bool,
    pub show_gradients: bool,
    pub show_glass_effect: bool,
    pub show_social_links: bool,
    pub show_scroll_indicator: bool,
    pub show_loading_screen: bool,

    // Spacing
    pub container_width: ContainerWidth,
    pub section_spacing: Spacing,
    pub card_spacing: Spacing,

    // Performance
    pub image_optimization: bool,
    pub lazy_loading: bool,
    pub preload_critical: bool,

    // Accessibility
    pub high_contrast: bool,
    pub focus_indicators: bool,
    pub keyboard_navigation: bool,
    pub screen_reader_optimized: bool,

    // Advanced
    #[serde(rename = "customCSS")]
    pub custom_css: String,
    pub dev_mode: bool,
    pub debug_mode: bool,

    /// Keys not known to this version
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "Portfolio".to_string(),
            site_tagline: "Professional Portfolio".to_string(),
            site_description: "A modern portfolio showcasing my work and expertise".to_string(),
            logo_url: "/logo.png".to_string(),
            favicon_url: "/favicon.ico".to_string(),
            logo_text: "Portfolio".to_string(),
            show_logo_text: true,
            logo_position: LogoPosition::Left,
            logo_size: LogoSize::Medium,

            meta_keywords: "portfolio, web development, react, javascript".to_string(),
            meta_author: "Portfolio Owner".to_string(),
            social_image: "/social-preview.jpg".to_string(),
            twitter_handle: "@portfolio".to_string(),

            template: "modern".to_string(),
            layout: LayoutKind::Standard,
            navigation: NavigationStyle::Horizontal,

            theme_mode: ThemeMode::Auto,

            color_scheme: "purple-pink".to_string(),
            primary_color: "#8b5cf6".to_string(),
            secondary_color: "#ec4899".to_string(),
            accent_color: "#f59e0b".to_string(),
            light_background_color: "#ffffff".to_string(),
            dark_background_color: "#000000".to_string(),

            font_family: FontFamily::Inter,
            font_size: FontSize::Normal,
            font_weight: FontWeight::Normal,
            line_height: LineHeight::Normal,

            animations_enabled: true,
            animation_speed: AnimationSpeed::Normal,
            reduced_motion: false,
            particle_effects: true,
            hover_effects: true,

            show_particles: true,
            show_gradients: true,
            show_glass_effect: true,
            show_social_links: true,
            show_scroll_indicator: true,
            show_loading_screen: true,

            container_width: ContainerWidth::Standard,
            section_spacing: Spacing::Normal,
            card_spacing: Spacing::Normal,

            image_optimization: true,
            lazy_loading: true,
            preload_critical: true,

            high_contrast: false,
            focus_indicators: true,
            keyboard_navigation: true,
            screen_reader_optimized: false,

            custom_css: String::new(),
            dev_mode: false,
            debug_mode: false,

            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Parse a (possibly partial) record on top of the defaults
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Apply a shallow patch, returning the merged record
    pub fn merged(&self, patch: &Patch) -> Result<Self, serde_json::Error> {
        patch::merge(self, patch)
    }

    /// All fields as a JSON object, keyed by their persisted names
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Look up a single field by its persisted name
    pub fn get(&self, key: &str) -> Option<Value> {
        self.to_map().remove(key)
    }

    /// Persisted names of all known fields
    pub fn known_keys() -> Vec<String> {
        Settings::default().to_map().keys().cloned().collect()
    }
}
