//! Theme derivation
//!
//! `apply_theme` turns a settings record into `StyleDirectives`: the CSS
//! custom properties, class toggles, custom stylesheet and document metadata
//! a page needs. The function is pure; writing the directives somewhere
//! (files, a live document) is left to the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::settings::{ColorScheme, Settings, ThemeMode};

/// Platform color preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Appearance::Dark
        } else {
            Appearance::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Appearance::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Appearance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Appearance::Light),
            "dark" => Ok(Appearance::Dark),
            other => Err(format!("unknown appearance '{}'", other)),
        }
    }
}

/// Resolve the theme mode against the platform preference
pub fn effective_theme(mode: ThemeMode, platform: Appearance) -> Appearance {
    match mode {
        ThemeMode::Light => Appearance::Light,
        ThemeMode::Dark => Appearance::Dark,
        ThemeMode::Auto => platform,
    }
}

/// A `<meta>` tag in the document head
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "attribute", rename_all = "lowercase")]
pub enum MetaTag {
    /// `<meta name="..." content="...">`
    Name { name: String, content: String },
    /// `<meta property="..." content="...">`
    Property { property: String, content: String },
}

impl MetaTag {
    fn name(name: &str, content: &str) -> Self {
        MetaTag::Name {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    fn property(property: &str, content: &str) -> Self {
        MetaTag::Property {
            property: property.to_string(),
            content: content.to_string(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            MetaTag::Name { content, .. } | MetaTag::Property { content, .. } => content,
        }
    }
}

/// Document head metadata derived from the branding settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentHead {
    pub title: Option<String>,
    pub favicon: Option<String>,
    pub meta: Vec<MetaTag>,
}

impl DocumentHead {
    /// Content of the `<meta name=...>` tag, if any
    pub fn meta_name(&self, name: &str) -> Option<&str> {
        self.meta.iter().find_map(|tag| match tag {
            MetaTag::Name { name: n, content } if n == name => Some(content.as_str()),
            _ => None,
        })
    }

    /// Content of the `<meta property=...>` tag, if any
    pub fn meta_property(&self, property: &str) -> Option<&str> {
        self.meta.iter().find_map(|tag| match tag {
            MetaTag::Property {
                property: p,
                content,
            } if p == property => Some(content.as_str()),
            _ => None,
        })
    }
}

/// Everything needed to style a page for a given settings record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDirectives {
    /// Effective theme; also the root class and `data-theme` value
    pub theme: Appearance,
    /// CSS custom properties set on the root element, in application order
    pub variables: Vec<(String, String)>,
    /// Inline properties forced on the body element
    pub body_styles: Vec<(String, String)>,
    /// Root classes switched on or off
    pub class_toggles: Vec<(String, bool)>,
    /// Free-text stylesheet supplied by the owner
    pub custom_css: Option<String>,
    pub head: DocumentHead,
}

impl StyleDirectives {
    /// Value of a custom property (name including the leading `--`)
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn body_style(&self, property: &str) -> Option<&str> {
        self.body_styles
            .iter()
            .find(|(n, _)| n == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_toggles
            .iter()
            .any(|(c, enabled)| c == class && *enabled)
    }

    /// Root classes to apply: the theme class plus every enabled toggle
    pub fn root_classes(&self) -> Vec<&str> {
        let mut classes = vec![self.theme.as_str()];
        classes.extend(
            self.class_toggles
                .iter()
                .filter(|(_, enabled)| *enabled)
                .map(|(c, _)| c.as_str()),
        );
        classes
    }

    /// Render the directives as a standalone stylesheet
    pub fn to_stylesheet(&self) -> String {
        let mut css = String::new();

        css.push_str(":root {\n");
        for (name, value) in &self.variables {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push_str("}\n");

        if !self.body_styles.is_empty() {
            css.push_str(&format!("\nbody[data-theme=\"{}\"] {{\n", self.theme));
            for (name, value) in &self.body_styles {
                css.push_str(&format!("  {}: {} !important;\n", name, value));
            }
            css.push_str("}\n");
        }

        if let Some(custom) = &self.custom_css {
            css.push_str("\n/* custom-portfolio-styles */\n");
            css.push_str(custom);
            if !custom.ends_with('\n') {
                css.push('\n');
            }
        }

        css
    }

    /// Render the document head metadata as an HTML fragment
    pub fn to_head_html(&self) -> String {
        let mut html = String::new();

        if let Some(title) = &self.head.title {
            html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        }
        if let Some(favicon) = &self.head.favicon {
            html.push_str(&format!(
                "<link rel=\"icon\" href=\"{}\">\n",
                escape_html(favicon)
            ));
        }
        for tag in &self.head.meta {
            match tag {
                MetaTag::Name { name, content } => html.push_str(&format!(
                    "<meta name=\"{}\" content=\"{}\">\n",
                    escape_html(name),
                    escape_html(content)
                )),
                MetaTag::Property { property, content } => html.push_str(&format!(
                    "<meta property=\"{}\" content=\"{}\">\n",
                    escape_html(property),
                    escape_html(content)
                )),
            }
        }
        html.push_str(&format!(
            "<script>document.documentElement.className = \"{}\"; document.body && document.body.setAttribute(\"data-theme\", \"{}\");</script>\n",
            self.root_classes().join(" "),
            self.theme
        ));

        html
    }
}

/// Opacity steps of the generated tint ladders; `None` is the base color
const TINT_LADDER: [(u16, Option<&str>); 10] = [
    (50, Some("0.05")),
    (100, Some("0.1")),
    (200, Some("0.2")),
    (300, Some("0.3")),
    (400, Some("0.6")),
    (500, None),
    (600, Some("0.8")),
    (700, Some("0.9")),
    (800, Some("0.95")),
    (900, Some("1")),
];

/// Derive the style directives for `settings`
///
/// `platform` is only consulted when the theme mode is `auto`.
pub fn apply_theme(settings: &Settings, platform: Appearance) -> StyleDirectives {
    let theme = effective_theme(settings.theme_mode, platform);
    let dark = theme.is_dark();

    let mut vars = Vars::default();
    let mut body_styles = Vec::new();

    vars.set("--primary-color", &settings.primary_color);
    vars.set("--secondary-color", &settings.secondary_color);
    vars.set("--accent-color", &settings.accent_color);

    vars.tint_ladder(&settings.primary_color, "primary");
    vars.tint_ladder(&settings.secondary_color, "secondary");
    vars.tint_ladder(&settings.accent_color, "accent");

    // Surface colors only exist for known schemes
    if let Some(scheme) = ColorScheme::find(&settings.color_scheme) {
        let (text, bg, card) = if dark {
            (scheme.dark_text, scheme.dark_bg, scheme.dark_card)
        } else {
            (scheme.light_text, scheme.light_bg, scheme.light_card)
        };

        vars.set("--text-color", text);
        vars.set("--bg-color", bg);
        vars.set("--card-color", card);
        vars.set("--border-color", if dark { "#374151" } else { "#d1d5db" });
        vars.set("--input-bg", if dark { "#374151" } else { "#ffffff" });
        vars.set("--input-text", if dark { "#f3f4f6" } else { "#1f2937" });
        vars.set(
            "--glass-bg",
            if dark {
                "rgba(255, 255, 255, 0.1)"
            } else {
                "rgba(255, 255, 255, 0.9)"
            },
        );
        vars.set(
            "--glass-border",
            if dark {
                "rgba(255, 255, 255, 0.2)"
            } else {
                "rgba(0, 0, 0, 0.1)"
            },
        );
        vars.set("--scrollbar-track", if dark { "#1a1a1a" } else { "#f3f4f6" });
        vars.set("--scrollbar-thumb", &settings.primary_color);

        if let Some((r, g, b)) = hex_to_rgb(text) {
            vars.set("--text-color-rgb", &format!("{}, {}, {}", r, g, b));
        }

        body_styles.push(("background-color".to_string(), bg.to_string()));
        body_styles.push(("color".to_string(), text.to_string()));
    }

    let font = settings.font_family.css_stack();
    vars.set("--font-family", font);
    body_styles.push(("font-family".to_string(), font.to_string()));

    vars.set("--container-width", settings.container_width.css_value());

    let duration = if !settings.animations_enabled || settings.reduced_motion {
        "0s"
    } else {
        settings.animation_speed.duration()
    };
    vars.set("--animation-duration", duration);
    vars.set("--transition-duration", duration);

    vars.set("--font-size-base", settings.font_size.css_value());
    vars.set("--line-height-base", settings.line_height.css_value());

    vars.set(
        "--particles-display",
        if settings.show_particles { "block" } else { "none" },
    );
    vars.set(
        "--gradients-opacity",
        if settings.show_gradients { "1" } else { "0" },
    );

    let custom_css = Some(settings.custom_css.clone()).filter(|css| !css.is_empty());

    StyleDirectives {
        theme,
        variables: vars.0,
        body_styles,
        class_toggles: vec![
            ("high-contrast".to_string(), settings.high_contrast),
            ("reduced-motion".to_string(), settings.reduced_motion),
        ],
        custom_css,
        head: document_head(settings),
    }
}

/// Title, favicon and meta tags; empty values are skipped
fn document_head(settings: &Settings) -> DocumentHead {
    let title = if settings.site_name.is_empty() {
        None
    } else if settings.site_tagline.is_empty() {
        Some(settings.site_name.clone())
    } else {
        Some(format!("{} - {}", settings.site_name, settings.site_tagline))
    };

    let favicon = Some(settings.favicon_url.clone()).filter(|f| !f.is_empty());

    let candidates = [
        MetaTag::name("description", &settings.site_description),
        MetaTag::name("keywords", &settings.meta_keywords),
        MetaTag::name("author", &settings.meta_author),
        MetaTag::property("og:title", &settings.site_name),
        MetaTag::property("og:description", &settings.site_description),
        MetaTag::property("og:image", &settings.social_image),
        MetaTag::property("og:type", "website"),
        MetaTag::name("twitter:card", "summary_large_image"),
        MetaTag::name("twitter:title", &settings.site_name),
        MetaTag::name("twitter:description", &settings.site_description),
        MetaTag::name("twitter:image", &settings.social_image),
        MetaTag::name("twitter:site", &settings.twitter_handle),
    ];

    DocumentHead {
        title,
        favicon,
        meta: candidates
            .into_iter()
            .filter(|tag| !tag.content().is_empty())
            .collect(),
    }
}

#[derive(Default)]
struct Vars(Vec<(String, String)>);

impl Vars {
    fn set(&mut self, name: &str, value: &str) {
        self.0.push((name.to_string(), value.to_string()));
    }

    /// `--{prefix}-50` .. `--{prefix}-900`; skipped for colors that are not `#rrggbb`
    fn tint_ladder(&mut self, base: &str, prefix: &str) {
        let Some((r, g, b)) = hex_to_rgb(base) else {
            return;
        };

        for (step, alpha) in TINT_LADDER {
            let value = match alpha {
                Some(alpha) => format!("rgba({}, {}, {}, {})", r, g, b, alpha),
                None => base.to_string(),
            };
            self.set(&format!("--{}-{}", prefix, step), &value);
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional, case-insensitive)
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(mode: ThemeMode) -> Settings {
        Settings {
            theme_mode: mode,
            ..Settings::default()
        }
    }

    #[test]
    fn test_auto_follows_platform() {
        let settings = settings_with(ThemeMode::Auto);

        let dark = apply_theme(&settings, Appearance::Dark);
        assert_eq!(dark.theme, Appearance::Dark);
        assert_eq!(dark.variable("--bg-color"), Some("#000000"));
        assert_eq!(dark.variable("--text-color"), Some("#f3f4f6"));

        let light = apply_theme(&settings, Appearance::Light);
        assert_eq!(light.theme, Appearance::Light);
        assert_eq!(light.variable("--bg-color"), Some("#ffffff"));
    }

    #[test]
    fn test_explicit_mode_ignores_platform() {
        let directives = apply_theme(&settings_with(ThemeMode::Light), Appearance::Dark);
        assert_eq!(directives.theme, Appearance::Light);
        assert_eq!(directives.variable("--card-color"), Some("#f9fafb"));
        assert_eq!(directives.variable("--border-color"), Some("#d1d5db"));
    }

    #[test]
    fn test_tint_ladder() {
        let directives = apply_theme(&Settings::default(), Appearance::Light);

        assert_eq!(
            directives.variable("--primary-50"),
            Some("rgba(139, 92, 246, 0.05)")
        );
        assert_eq!(directives.variable("--primary-500"), Some("#8b5cf6"));
        assert_eq!(
            directives.variable("--primary-900"),
            Some("rgba(139, 92, 246, 1)")
        );
        assert_eq!(
            directives.variable("--accent-400"),
            Some("rgba(245, 158, 11, 0.6)")
        );
    }

    #[test]
    fn test_invalid_hex_skips_ladder() {
        let settings = Settings {
            secondary_color: "pink".to_string(),
            ..Settings::default()
        };
        let directives = apply_theme(&settings, Appearance::Light);

        assert_eq!(directives.variable("--secondary-color"), Some("pink"));
        assert!(directives.variable("--secondary-50").is_none());
    }

    #[test]
    fn test_custom_scheme_has_no_surface_colors() {
        let settings = Settings {
            color_scheme: "custom".to_string(),
            ..Settings::default()
        };
        let directives = apply_theme(&settings, Appearance::Dark);

        assert!(directives.variable("--bg-color").is_none());
        assert!(directives.body_style("background-color").is_none());
        assert!(directives.variable("--primary-color").is_some());
    }

    #[test]
    fn test_text_rgb() {
        let directives = apply_theme(&settings_with(ThemeMode::Light), Appearance::Light);
        assert_eq!(directives.variable("--text-color-rgb"), Some("55, 65, 81"));
    }

    #[test]
    fn test_animation_durations() {
        let mut settings = Settings::default();
        let directives = apply_theme(&settings, Appearance::Light);
        assert_eq!(directives.variable("--animation-duration"), Some("0.5s"));

        settings.animation_speed = crate::settings::AnimationSpeed::Slow;
        let directives = apply_theme(&settings, Appearance::Light);
        assert_eq!(directives.variable("--transition-duration"), Some("0.8s"));

        settings.reduced_motion = true;
        let directives = apply_theme(&settings, Appearance::Light);
        assert_eq!(directives.variable("--animation-duration"), Some("0s"));
        assert!(directives.has_class("reduced-motion"));

        settings.reduced_motion = false;
        settings.animations_enabled = false;
        let directives = apply_theme(&settings, Appearance::Light);
        assert_eq!(directives.variable("--transition-duration"), Some("0s"));
        assert!(!directives.has_class("reduced-motion"));
    }

    #[test]
    fn test_visibility_toggles() {
        let settings = Settings {
            show_particles: false,
            show_gradients: false,
            high_contrast: true,
            ..Settings::default()
        };
        let directives = apply_theme(&settings, Appearance::Light);

        assert_eq!(directives.variable("--particles-display"), Some("none"));
        assert_eq!(directives.variable("--gradients-opacity"), Some("0"));
        assert!(directives.has_class("high-contrast"));
        assert_eq!(directives.root_classes(), vec!["light", "high-contrast"]);
    }

    #[test]
    fn test_layout_tokens() {
        let settings = Settings {
            container_width: crate::settings::ContainerWidth::Wide,
            font_size: crate::settings::FontSize::Large,
            line_height: crate::settings::LineHeight::Relaxed,
            font_family: crate::settings::FontFamily::Roboto,
            ..Settings::default()
        };
        let directives = apply_theme(&settings, Appearance::Light);

        assert_eq!(directives.variable("--container-width"), Some("1536px"));
        assert_eq!(directives.variable("--font-size-base"), Some("1.125rem"));
        assert_eq!(directives.variable("--line-height-base"), Some("1.75"));
        assert_eq!(
            directives.body_style("font-family"),
            Some("\"Roboto\", sans-serif")
        );
    }

    #[test]
    fn test_document_head() {
        let directives = apply_theme(&Settings::default(), Appearance::Light);
        let head = &directives.head;

        assert_eq!(
            head.title.as_deref(),
            Some("Portfolio - Professional Portfolio")
        );
        assert_eq!(head.favicon.as_deref(), Some("/favicon.ico"));
        assert_eq!(head.meta_name("author"), Some("Portfolio Owner"));
        assert_eq!(head.meta_property("og:type"), Some("website"));
        assert_eq!(head.meta_name("twitter:site"), Some("@portfolio"));
    }

    #[test]
    fn test_empty_branding_is_skipped() {
        let settings = Settings {
            site_tagline: String::new(),
            twitter_handle: String::new(),
            favicon_url: String::new(),
            ..Settings::default()
        };
        let head = apply_theme(&settings, Appearance::Light).head;

        assert_eq!(head.title.as_deref(), Some("Portfolio"));
        assert!(head.favicon.is_none());
        assert!(head.meta_name("twitter:site").is_none());
    }

    #[test]
    fn test_custom_css() {
        let directives = apply_theme(&Settings::default(), Appearance::Light);
        assert!(directives.custom_css.is_none());

        let settings = Settings {
            custom_css: ".hero { color: red; }".to_string(),
            ..Settings::default()
        };
        let directives = apply_theme(&settings, Appearance::Light);
        assert!(directives
            .to_stylesheet()
            .contains(".hero { color: red; }"));
    }

    #[test]
    fn test_stylesheet_rendering() {
        let css = apply_theme(&Settings::default(), Appearance::Dark).to_stylesheet();

        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --primary-color: #8b5cf6;\n"));
        assert!(css.contains("body[data-theme=\"dark\"]"));
        assert!(css.contains("background-color: #000000 !important;"));
    }

    #[test]
    fn test_head_rendering_escapes() {
        let settings = Settings {
            site_name: "Tom & Jerry".to_string(),
            site_description: "Say \"hi\"".to_string(),
            ..Settings::default()
        };
        let html = apply_theme(&settings, Appearance::Light).to_head_html();

        assert!(html.contains("<title>Tom &amp; Jerry - Professional Portfolio</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Say &quot;hi&quot;\">"));
        assert!(html.contains("<meta property=\"og:title\" content=\"Tom &amp; Jerry\">"));
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#3b82f6"), Some((59, 130, 246)));
        assert_eq!(hex_to_rgb("FFFFFF"), Some((255, 255, 255)));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#gggggg"), None);
    }

    #[test]
    fn test_appearance_parse() {
        assert_eq!("Dark".parse::<Appearance>(), Ok(Appearance::Dark));
        assert_eq!(" light ".parse::<Appearance>(), Ok(Appearance::Light));
        assert!("dim".parse::<Appearance>().is_err());
    }
}
