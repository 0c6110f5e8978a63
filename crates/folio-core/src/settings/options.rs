//! Enumerated setting values
//!
//! Every option serializes to the lowercase (or kebab-case) string used in
//! the persisted settings record.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoPosition {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    #[serde(rename = "default")]
    Standard,
    Sidebar,
    Grid,
    Masonry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationStyle {
    #[default]
    Horizontal,
    Vertical,
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Inter,
    Poppins,
    Roboto,
    Playfair,
    Montserrat,
}

impl FontFamily {
    /// CSS `font-family` value
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Inter => "\"Inter\", sans-serif",
            FontFamily::Poppins => "\"Poppins\", sans-serif",
            FontFamily::Roboto => "\"Roboto\", sans-serif",
            FontFamily::Playfair => "\"Playfair Display\", serif",
            FontFamily::Montserrat => "\"Montserrat\", sans-serif",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl FontSize {
    pub fn css_value(self) -> &'static str {
        match self {
            FontSize::Small => "0.875rem",
            FontSize::Normal => "1rem",
            FontSize::Large => "1.125rem",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineHeight {
    Tight,
    #[default]
    Normal,
    Relaxed,
}

impl LineHeight {
    pub fn css_value(self) -> &'static str {
        match self {
            LineHeight::Tight => "1.25",
            LineHeight::Normal => "1.5",
            LineHeight::Relaxed => "1.75",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    /// Duration used for both animations and transitions
    pub fn duration(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "0.8s",
            AnimationSpeed::Normal => "0.5s",
            AnimationSpeed::Fast => "0.3s",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerWidth {
    Narrow,
    #[default]
    #[serde(rename = "default")]
    Standard,
    Wide,
    Full,
}

impl ContainerWidth {
    pub fn css_value(self) -> &'static str {
        match self {
            ContainerWidth::Narrow => "1024px",
            ContainerWidth::Standard => "1280px",
            ContainerWidth::Wide => "1536px",
            ContainerWidth::Full => "100%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Spacious,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_variants_serialize_as_default() {
        assert_eq!(
            serde_json::to_string(&LayoutKind::Standard).unwrap(),
            "\"default\""
        );
        assert_eq!(
            serde_json::to_string(&ContainerWidth::Standard).unwrap(),
            "\"default\""
        );
    }

    #[test]
    fn test_parse_lowercase_names() {
        let mode: ThemeMode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, ThemeMode::Dark);

        let family: FontFamily = serde_json::from_str("\"playfair\"").unwrap();
        assert_eq!(family.css_stack(), "\"Playfair Display\", serif");

        assert!(serde_json::from_str::<ThemeMode>("\"sepia\"").is_err());
    }
}
