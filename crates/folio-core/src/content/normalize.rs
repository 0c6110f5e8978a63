//! Field normalization for edits coming from text input
//!
//! Front ends collect every field as text. Before a patch reaches the
//! document, comma-separated lists are split, `"true"`/`"false"` become
//! booleans, numeric fields are parsed and an empty blog date becomes today.

use chrono::NaiveDate;
use serde_json::{json, Value};

use super::{ListSection, ScalarSection, Section};
use crate::patch::{into_object, Patch};

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Only `true` and `"true"` count as true
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim() == "true",
        _ => false,
    }
}

fn list_fields(section: Section) -> &'static [&'static str] {
    match section {
        Section::Scalar(ScalarSection::Personal) => &["languages"],
        Section::Scalar(ScalarSection::Skills) => &["soft"],
        Section::Keyed(ListSection::Experience) => &["technologies"],
        Section::Keyed(ListSection::Projects) | Section::Keyed(ListSection::Blog) => &["tags"],
        _ => &[],
    }
}

fn bool_fields(section: Section) -> &'static [&'static str] {
    match section {
        Section::Keyed(ListSection::Projects) => &["featured"],
        Section::Scalar(ScalarSection::Resume) => &["available"],
        _ => &[],
    }
}

fn number_fields(section: Section) -> &'static [&'static str] {
    match section {
        Section::Scalar(ScalarSection::Personal) => &["age"],
        Section::Keyed(ListSection::Testimonials) => &["rating"],
        _ => &[],
    }
}

/// Convert text values in `patch` to the types `section` stores
///
/// Only keys present in the patch are touched.
pub fn normalize_fields(section: Section, patch: &mut Patch, today: NaiveDate) {
    for field in list_fields(section) {
        if let Some(Value::String(text)) = patch.get(*field) {
            let items = split_list(text);
            patch.insert(field.to_string(), json!(items));
        }
    }

    for field in bool_fields(section) {
        if let Some(value) = patch.get(*field) {
            let flag = coerce_bool(value);
            patch.insert(field.to_string(), Value::Bool(flag));
        }
    }

    for field in number_fields(section) {
        if let Some(Value::String(text)) = patch.get(*field) {
            let text = text.trim();
            let number = if text.is_empty() {
                Value::Null
            } else {
                match text.parse::<u64>() {
                    Ok(n) => Value::from(n),
                    // Left as text; the merge reports it
                    Err(_) => continue,
                }
            };
            patch.insert(field.to_string(), number);
        }
    }

    if section == Section::Keyed(ListSection::Blog) {
        let empty = match patch.get("publishedAt") {
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(Value::Null) => true,
            _ => false,
        };
        if empty {
            patch.insert("publishedAt".to_string(), json!(today.to_string()));
        }
    }
}

/// Starting fields for a new item in a list section
pub fn new_item_fields(section: ListSection, today: NaiveDate) -> Patch {
    let value = match section {
        ListSection::Experience => json!({
            "company": "New Company",
            "position": "New Position",
            "period": "2024 - Present",
            "description": "Description here...",
            "technologies": ["React", "JavaScript"],
        }),
        ListSection::Education => json!({
            "institution": "New Institution",
            "degree": "New Degree",
            "period": "2020 - 2024",
            "description": "Description here...",
            "gpa": "",
        }),
        ListSection::Projects => json!({
            "title": "New Project",
            "description": "Project description...",
            "image": "https://via.placeholder.com/600x400",
            "tags": ["React", "JavaScript"],
            "demoUrl": "#",
            "githubUrl": "#",
            "featured": false,
            "status": "completed",
        }),
        ListSection::Testimonials => json!({
            "name": "New Client",
            "position": "Position at Company",
            "company": "Company Name",
            "message": "Testimonial message...",
            "avatar": "https://via.placeholder.com/100x100",
            "rating": 5,
        }),
        ListSection::Blog => json!({
            "title": "New Blog Post",
            "excerpt": "Blog post excerpt...",
            "content": "Blog post content...",
            "image": "https://via.placeholder.com/600x400",
            "tags": ["Web Development"],
            "publishedAt": today.to_string(),
            "readTime": "5 min",
            "status": "draft",
        }),
    };
    into_object(value)
}
