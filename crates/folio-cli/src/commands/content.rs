//! Content command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use serde_json::Value;

use folio_core::content::normalize::{new_item_fields, normalize_fields};
use folio_core::content::{ContentError, ContentStore, EditKey, ListSection, Section};
use folio_core::patch::merge_into;
use folio_core::{Config, FileStore, Patch};

use super::{require_login, split_assignment};
use crate::output::{display_value, Output, OutputFormat};
use crate::prompt::{confirm, prompt_with_default};

pub fn show(
    storage: FileStore,
    section: Option<String>,
    id: Option<u64>,
    output: &Output,
) -> Result<()> {
    let store = ContentStore::open(storage)?;
    let document = store.document();

    let Some(name) = section else {
        if output.format == OutputFormat::Json {
            println!("{}", store.export_data()?);
            return Ok(());
        }
        for (i, section) in Section::all().enumerate() {
            if i > 0 && !output.is_quiet() {
                println!();
            }
            output.print_section(section, &document.section_value(section));
        }
        return Ok(());
    };

    let section: Section = name.parse()?;
    match (section, id) {
        (Section::Keyed(list), Some(id)) => {
            let item = document
                .item(list, id)
                .ok_or(ContentError::ItemNotFound { section: list, id })?;
            output.print_item(&item);
        }
        (Section::Scalar(_), Some(_)) => {
            return Err(ContentError::UnexpectedId {
                section: section.to_string(),
            }
            .into())
        }
        _ => output.print_section(section, &document.section_value(section)),
    }
    Ok(())
}

/// Save `KEY=VALUE` assignments into a section or item
pub fn set(
    storage: FileStore,
    config: &Config,
    section: String,
    id: Option<u64>,
    assignments: Vec<String>,
    output: &Output,
) -> Result<()> {
    require_login(&storage, config)?;
    let section: Section = section.parse()?;
    if assignments.is_empty() {
        bail!("Nothing to set. Usage: folio content set SECTION [--id ID] KEY=VALUE...");
    }

    let patch = content_patch(section, &assignments, today())?;
    let mut store = ContentStore::open(storage)?;
    store.save(section, id, &patch)?;

    output.success(&format!("Saved {}", EditKey::for_save(section, id)));
    Ok(())
}

/// Add an item, starting from the section's placeholder fields
pub fn add(
    storage: FileStore,
    config: &Config,
    section: String,
    assignments: Vec<String>,
    output: &Output,
) -> Result<()> {
    require_login(&storage, config)?;
    let list = list_section(&section)?;

    let today = today();
    let mut fields = new_item_fields(list, today);
    merge_into(
        &mut fields,
        &content_patch(Section::Keyed(list), &assignments, today)?,
    );

    let mut store = ContentStore::open(storage)?;
    let id = store.add_item(list, &fields)?;

    output.success(&format!("Added {} item {}", list, id));
    if let Some(item) = store.document().item(list, id) {
        output.print_item(&item);
    }
    Ok(())
}

pub fn delete(
    storage: FileStore,
    config: &Config,
    section: String,
    id: u64,
    yes: bool,
    output: &Output,
) -> Result<()> {
    require_login(&storage, config)?;
    let list = list_section(&section)?;

    let mut store = ContentStore::open(storage)?;
    let item = store
        .document()
        .item(list, id)
        .ok_or(ContentError::ItemNotFound { section: list, id })?;

    if !yes && output.should_prompt() {
        output.print_item(&item);
        if !confirm(&format!("Delete this {} item?", list))? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_item(list, id)?;
    output.success(&format!("Deleted {} item {}", list, id));
    Ok(())
}

/// Edit a section or item field by field
pub fn edit(
    storage: FileStore,
    config: &Config,
    section: String,
    id: Option<u64>,
    output: &Output,
) -> Result<()> {
    require_login(&storage, config)?;
    let section: Section = section.parse()?;

    let mut store = ContentStore::open(storage)?;
    let current = match (section, id) {
        (Section::Keyed(list), Some(id)) => store
            .document()
            .item(list, id)
            .ok_or(ContentError::ItemNotFound { section: list, id })?,
        (Section::Keyed(list), None) => {
            return Err(ContentError::IdRequired { section: list }.into())
        }
        (Section::Scalar(_), Some(_)) => {
            return Err(ContentError::UnexpectedId {
                section: section.to_string(),
            }
            .into())
        }
        (Section::Scalar(_), None) => store.document().section_value(section),
    };
    let Value::Object(fields) = current else {
        bail!("Nothing to edit in {}", section);
    };

    let key = EditKey::for_save(section, id);
    store.toggle_edit_mode(key);

    println!("Editing {}", key);
    println!("Press Enter to keep current value, or type new value.\n");

    let mut patch = Patch::new();
    for (name, value) in &fields {
        let shown = match value {
            _ if name == "id" => continue,
            Value::String(s) => s.clone(),
            Value::Bool(_) | Value::Number(_) => value.to_string(),
            Value::Null => String::new(),
            Value::Array(items) if items.iter().all(Value::is_string) => display_value(value),
            // Nested records are edited with `content set`
            _ => continue,
        };
        if let Some(new_value) = prompt_with_default(name, &shown)? {
            if new_value != shown {
                patch.insert(name.clone(), Value::String(new_value));
            }
        }
    }

    if patch.is_empty() {
        store.toggle_edit_mode(key);
        output.message("No changes.");
        return Ok(());
    }

    normalize_fields(section, &mut patch, today());
    store.save(section, id, &patch)?;
    output.success(&format!("Saved {}", key));
    Ok(())
}

pub fn export(
    storage: FileStore,
    config: &Config,
    dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = ContentStore::open(storage)?;
    let dir = dir.unwrap_or_else(|| config.output_dir());

    let path = store.export_to_dir(&dir)?;
    output.success(&format!("Exported content to {}", path.display()));
    Ok(())
}

pub fn import(storage: FileStore, config: &Config, file: PathBuf, output: &Output) -> Result<()> {
    require_login(&storage, config)?;
    let text =
        fs::read_to_string(&file).with_context(|| format!("Failed to read {:?}", file))?;

    let mut store = ContentStore::open(storage)?;
    store
        .import_data(&text)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    output.success(&format!("Imported content from {}", file.display()));
    Ok(())
}

fn list_section(name: &str) -> Result<ListSection> {
    match name.parse::<Section>()? {
        Section::Keyed(list) => Ok(list),
        Section::Scalar(scalar) => bail!(
            "'{}' is a single record; use `folio content set {}` instead",
            scalar,
            scalar
        ),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Build a patch from `KEY=VALUE` pairs
///
/// Values are text unless they look like a JSON array or object; text is
/// then converted to the section's field types.
fn content_patch(section: Section, assignments: &[String], today: NaiveDate) -> Result<Patch> {
    let mut patch = Patch::new();
    for arg in assignments {
        let (key, raw) = split_assignment(arg)?;
        patch.insert(key.to_string(), parse_field(key, raw)?);
    }
    normalize_fields(section, &mut patch, today);
    Ok(patch)
}

fn parse_field(key: &str, raw: &str) -> Result<Value> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        serde_json::from_str(raw).with_context(|| format!("Invalid JSON for {}", key))
    } else {
        Ok(Value::String(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::content::ScalarSection;
    use serde_json::json;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    #[test]
    fn test_project_patch() {
        let patch = content_patch(
            Section::Keyed(ListSection::Projects),
            &args(&["title=Quarry", "tags=Rust, CLI", "featured=true"]),
            date(),
        )
        .unwrap();

        assert_eq!(patch["title"], json!("Quarry"));
        assert_eq!(patch["tags"], json!(["Rust", "CLI"]));
        assert_eq!(patch["featured"], json!(true));
    }

    #[test]
    fn test_json_values() {
        let patch = content_patch(
            Section::Scalar(ScalarSection::Skills),
            &args(&[r#"technical=[{"name":"Go","level":60}]"#, "soft=Writing"]),
            date(),
        )
        .unwrap();

        assert_eq!(patch["technical"][0]["level"], json!(60));
        assert_eq!(patch["soft"], json!(["Writing"]));

        assert!(parse_field("technical", "[oops").is_err());
    }

    #[test]
    fn test_text_that_looks_numeric_stays_text() {
        let patch = content_patch(
            Section::Keyed(ListSection::Education),
            &args(&["gpa=3.8"]),
            date(),
        )
        .unwrap();
        assert_eq!(patch["gpa"], json!("3.8"));
    }

    #[test]
    fn test_list_section() {
        assert_eq!(list_section("blog").unwrap(), ListSection::Blog);
        assert!(list_section("personal").is_err());
        assert!(list_section("services").is_err());
    }
}
