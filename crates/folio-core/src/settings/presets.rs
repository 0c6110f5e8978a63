//! Built-in color schemes and templates
//!
//! Both tables are immutable reference data. A color scheme supplies the
//! three brand colors plus the text, background and card colors used for
//! each theme; a template is a named patch applied to the settings.

use serde::Serialize;
use serde_json::json;

use crate::patch::{into_object, Patch};

/// A named color preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub gradients: [&'static str; 3],
    pub light_text: &'static str,
    pub dark_text: &'static str,
    pub light_bg: &'static str,
    pub dark_bg: &'static str,
    pub light_card: &'static str,
    pub dark_card: &'static str,
}

const fn scheme(
    name: &'static str,
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    gradients: [&'static str; 3],
) -> ColorScheme {
    ColorScheme {
        name,
        primary,
        secondary,
        accent,
        gradients,
        light_text: "#374151",
        dark_text: "#f3f4f6",
        light_bg: "#ffffff",
        dark_bg: "#000000",
        light_card: "#f9fafb",
        dark_card: "#1f2937",
    }
}

pub const COLOR_SCHEMES: [ColorScheme; 5] = [
    scheme(
        "purple-pink",
        "#8b5cf6",
        "#ec4899",
        "#f59e0b",
        ["from-purple-500", "via-pink-500", "to-red-500"],
    ),
    scheme(
        "blue-cyan",
        "#3b82f6",
        "#06b6d4",
        "#10b981",
        ["from-blue-500", "via-cyan-500", "to-teal-500"],
    ),
    scheme(
        "green-teal",
        "#10b981",
        "#14b8a6",
        "#f59e0b",
        ["from-green-500", "via-emerald-500", "to-teal-500"],
    ),
    scheme(
        "orange-red",
        "#f97316",
        "#ef4444",
        "#eab308",
        ["from-orange-500", "via-red-500", "to-pink-500"],
    ),
    scheme(
        "monochrome",
        "#6b7280",
        "#374151",
        "#9ca3af",
        ["from-gray-600", "via-gray-500", "to-gray-400"],
    ),
];

impl ColorScheme {
    /// Look up a preset by name
    pub fn find(name: &str) -> Option<&'static ColorScheme> {
        COLOR_SCHEMES.iter().find(|s| s.name == name)
    }

    pub fn all() -> &'static [ColorScheme] {
        &COLOR_SCHEMES
    }
}

/// A named settings preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub features: [&'static str; 4],
}

pub const TEMPLATES: [Template; 5] = [
    Template {
        id: "modern",
        name: "Modern",
        description: "Clean, contemporary design with smooth animations",
        features: [
            "Glass morphism",
            "Gradient backgrounds",
            "Smooth animations",
            "Modern typography",
        ],
    },
    Template {
        id: "classic",
        name: "Classic",
        description: "Traditional professional layout with subtle effects",
        features: [
            "Clean lines",
            "Professional colors",
            "Minimal animations",
            "Traditional layout",
        ],
    },
    Template {
        id: "minimal",
        name: "Minimal",
        description: "Simple, clean design focusing on content",
        features: [
            "Lots of whitespace",
            "Simple colors",
            "Minimal effects",
            "Content-focused",
        ],
    },
    Template {
        id: "creative",
        name: "Creative",
        description: "Bold, artistic design with dynamic elements",
        features: [
            "Bold colors",
            "Creative layouts",
            "Dynamic animations",
            "Artistic elements",
        ],
    },
    Template {
        id: "cyberpunk",
        name: "Cyberpunk",
        description: "Futuristic neon-themed design",
        features: [
            "Neon colors",
            "Glitch effects",
            "Dark theme",
            "Futuristic elements",
        ],
    },
];

impl Template {
    pub fn find(id: &str) -> Option<&'static Template> {
        TEMPLATES.iter().find(|t| t.id == id)
    }

    pub fn all() -> &'static [Template] {
        &TEMPLATES
    }

    /// Settings patch applied by this template
    pub fn patch(&self) -> Patch {
        template_patch(self.id)
    }
}

/// Settings patch for a template name; unknown names give an empty patch
pub fn template_patch(id: &str) -> Patch {
    let value = match id {
        "modern" => json!({
            "template": "modern",
            "colorScheme": "purple-pink",
            "showGradients": true,
            "showGlassEffect": true,
            "showParticles": true,
            "animationsEnabled": true,
            "animationSpeed": "normal",
            "fontFamily": "inter",
            "layout": "default",
        }),
        "classic" => json!({
            "template": "classic",
            "colorScheme": "blue-cyan",
            "showGradients": false,
            "showGlassEffect": false,
            "showParticles": false,
            "animationsEnabled": true,
            "animationSpeed": "slow",
            "fontFamily": "roboto",
            "layout": "default",
        }),
        "minimal" => json!({
            "template": "minimal",
            "colorScheme": "monochrome",
            "showGradients": false,
            "showGlassEffect": false,
            "showParticles": false,
            "animationsEnabled": false,
            "animationSpeed": "fast",
            "fontFamily": "inter",
            "layout": "default",
            "sectionSpacing": "spacious",
        }),
        "creative" => json!({
            "template": "creative",
            "colorScheme": "orange-red",
            "showGradients": true,
            "showGlassEffect": true,
            "showParticles": true,
            "animationsEnabled": true,
            "animationSpeed": "fast",
            "fontFamily": "poppins",
            "layout": "grid",
        }),
        "cyberpunk" => json!({
            "template": "cyberpunk",
            "colorScheme": "purple-pink",
            "showGradients": true,
            "showGlassEffect": true,
            "showParticles": true,
            "animationsEnabled": true,
            "animationSpeed": "fast",
            "fontFamily": "montserrat",
            "layout": "default",
            "primaryColor": "#00ff88",
            "secondaryColor": "#ff0080",
            "accentColor": "#ffff00",
            "backgroundColor": "#000000",
        }),
        _ => json!({}),
    };
    into_object(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_find_scheme() {
        let scheme = ColorScheme::find("blue-cyan").unwrap();
        assert_eq!(scheme.primary, "#3b82f6");
        assert_eq!(scheme.dark_card, "#1f2937");

        assert!(ColorScheme::find("custom").is_none());
        assert_eq!(ColorScheme::all().len(), 5);
    }

    #[test]
    fn test_every_template_patch_applies() {
        for template in Template::all() {
            let patch = template.patch();
            assert!(!patch.is_empty(), "{} has no patch", template.id);

            let merged = Settings::default().merged(&patch).unwrap();
            assert_eq!(merged.template, template.id);
        }
    }

    #[test]
    fn test_template_schemes_exist() {
        for template in Template::all() {
            let patch = template.patch();
            let scheme = patch["colorScheme"].as_str().unwrap();
            assert!(ColorScheme::find(scheme).is_some(), "{}", scheme);
        }
    }

    #[test]
    fn test_unknown_template_is_empty() {
        assert!(template_patch("brutalist").is_empty());
        assert!(Template::find("brutalist").is_none());
    }
}
