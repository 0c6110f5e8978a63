//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;
use serde_json::Value;

use folio_core::content::{ListSection, Section};
use folio_core::settings::{ColorScheme, Settings, Template};
use folio_core::StyleDirectives;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print the whole settings record, or a single field
    pub fn print_settings(&self, settings: &Settings, key: Option<&str>) {
        let fields = settings.to_map();

        if let Some(key) = key {
            let value = fields.get(key).cloned().unwrap_or(Value::Null);
            match self.format {
                OutputFormat::Json => print_json(&serde_json::json!({ key: value })),
                _ => println!("{}", display_value(&value)),
            }
            return;
        }

        match self.format {
            OutputFormat::Human => {
                let width = fields.keys().map(|k| k.len()).max().unwrap_or(0);
                for (name, value) in &fields {
                    println!("{:width$}  {}", name, display_value(value), width = width);
                }
            }
            OutputFormat::Json => print_json(settings),
            OutputFormat::Quiet => {
                for name in fields.keys() {
                    println!("{}", name);
                }
            }
        }
    }

    pub fn print_templates(&self, templates: &[Template], current: &str) {
        match self.format {
            OutputFormat::Human => {
                for template in templates {
                    let marker = if template.id == current { "*" } else { " " };
                    println!("{} {:10} {}", marker, template.id, template.description);
                    println!("             {}", template.features.join(", "));
                }
            }
            OutputFormat::Json => print_json(&templates),
            OutputFormat::Quiet => {
                for template in templates {
                    println!("{}", template.id);
                }
            }
        }
    }

    pub fn print_schemes(&self, schemes: &[ColorScheme], current: &str) {
        match self.format {
            OutputFormat::Human => {
                for scheme in schemes {
                    let marker = if scheme.name == current { "*" } else { " " };
                    println!(
                        "{} {:12} {} {} {}",
                        marker, scheme.name, scheme.primary, scheme.secondary, scheme.accent
                    );
                }
            }
            OutputFormat::Json => print_json(&schemes),
            OutputFormat::Quiet => {
                for scheme in schemes {
                    println!("{}", scheme.name);
                }
            }
        }
    }

    /// Print derived style directives
    pub fn print_directives(&self, directives: &StyleDirectives) {
        match self.format {
            OutputFormat::Human => {
                println!("Theme: {}", directives.theme);
                println!("Classes: {}", directives.root_classes().join(" "));
                if let Some(title) = &directives.head.title {
                    println!("Title: {}", title);
                }
                println!();
                print!("{}", directives.to_stylesheet());
            }
            OutputFormat::Json => print_json(directives),
            OutputFormat::Quiet => println!("{}", directives.theme),
        }
    }

    /// Print one content section
    pub fn print_section(&self, section: Section, value: &Value) {
        match self.format {
            OutputFormat::Human => {
                println!("── {} ──", section);
                match (section, value) {
                    (Section::Keyed(list), Value::Array(items)) => {
                        if items.is_empty() {
                            println!("No items.");
                            return;
                        }
                        for item in items {
                            println!(
                                "{:>4} | {}",
                                display_value(&item["id"]),
                                truncate(&item_label(list, item), 70)
                            );
                        }
                        println!("\n{} item(s)", items.len());
                    }
                    _ => print_fields(value),
                }
            }
            OutputFormat::Json => print_json(value),
            OutputFormat::Quiet => {
                if let Value::Array(items) = value {
                    for item in items {
                        println!("{}", display_value(&item["id"]));
                    }
                }
            }
        }
    }

    /// Print a single list item
    pub fn print_item(&self, item: &Value) {
        match self.format {
            OutputFormat::Human => print_fields(item),
            OutputFormat::Json => print_json(item),
            OutputFormat::Quiet => println!("{}", display_value(&item["id"])),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a failure notice; shown even in quiet mode
    pub fn failure(&self, message: &str, hint: Option<&str>) {
        match self.format {
            OutputFormat::Json => {
                let mut body = serde_json::json!({"status": "error", "message": message});
                if let Some(hint) = hint {
                    body["hint"] = hint.into();
                }
                println!("{}", body);
            }
            _ => {
                eprintln!("✗ {}", message);
                if let Some(hint) = hint {
                    eprintln!("  {}", hint);
                }
            }
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to format output: {}", e),
    }
}

fn print_fields(value: &Value) {
    let Value::Object(fields) = value else {
        println!("{}", display_value(value));
        return;
    };

    let width = fields.keys().map(|k| k.len()).max().unwrap_or(0);
    for (name, value) in fields {
        println!("{:width$}  {}", name, display_value(value), width = width);
    }
}

/// One-line rendering of a JSON value
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "(not set)".to_string(),
        Value::String(s) if s.is_empty() => "(empty)".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Short description of a list item
fn item_label(section: ListSection, item: &Value) -> String {
    let field = |name: &str| item[name].as_str().unwrap_or("").to_string();

    match section {
        ListSection::Experience => format!(
            "{} at {} ({})",
            field("position"),
            field("company"),
            field("period")
        ),
        ListSection::Education => format!(
            "{}, {} ({})",
            field("degree"),
            field("institution"),
            field("period")
        ),
        ListSection::Projects => {
            let featured = if item["featured"].as_bool().unwrap_or(false) {
                " (featured)"
            } else {
                ""
            };
            format!("{} [{}]{}", field("title"), field("status"), featured)
        }
        ListSection::Testimonials => format!(
            "{}, {} ({}/5)",
            field("name"),
            field("company"),
            display_value(&item["rating"])
        ),
        ListSection::Blog => format!(
            "{} [{}] {}",
            field("title"),
            field("status"),
            field("publishedAt")
        ),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
