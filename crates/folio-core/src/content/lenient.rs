//! Field decoders for content written by the dashboard forms
//!
//! Form input is stored as entered: numbers often arrive as text and
//! cleared fields as `null`. These decoders accept those shapes while still
//! rejecting text that is not a number, date or boolean.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;

use super::normalize::split_list;

/// `null` becomes the type's default
pub fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Text; `null` is empty and numbers or booleans are written out
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        value => scalar_text(value).map_err(|v| de::Error::invalid_type(unexpected(&v), &"a string")),
    }
}

/// A list of strings; a single string is split on commas
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(split_list(&s)),
        Value::Array(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| {
                scalar_text(item)
                    .map_err(|v| de::Error::invalid_type(unexpected(&v), &"a list of strings"))
            })
            .collect(),
        other => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a list of strings",
        )),
    }
}

/// A boolean, also accepted as `"true"` or `"false"`
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => match s.trim() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            _ => Err(de::Error::invalid_value(Unexpected::Str(&s), &"a boolean")),
        },
        other => Err(de::Error::invalid_type(unexpected(&other), &"a boolean")),
    }
}

/// A number, also accepted as text; `null` and empty text give the default
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    Ok(optional_number(deserializer)?.unwrap_or_default())
}

/// Like [`number`], with `null` and empty text as `None`
pub fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s,
        other => return Err(de::Error::invalid_type(unexpected(&other), &"a number")),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_number(trimmed)
        .map(Some)
        .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(trimmed), &"a number"))
}

/// A `YYYY-MM-DD` date; timestamps are cut to their date part
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let day = trimmed.get(..10).unwrap_or(trimmed);
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| de::Error::invalid_value(Unexpected::Str(trimmed), &"a YYYY-MM-DD date"))
        }
        other => Err(de::Error::invalid_type(unexpected(&other), &"a date")),
    }
}

fn scalar_text(value: Value) -> Result<String, Value> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(other),
    }
}

/// Whole floats such as `4.0` count as integers
fn parse_number<T: FromStr>(text: &str) -> Option<T> {
    text.parse().ok().or_else(|| match text.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 => f.to_string().parse().ok(),
        _ => None,
    })
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Form {
        #[serde(deserialize_with = "text")]
        label: String,
        #[serde(deserialize_with = "text_list")]
        tags: Vec<String>,
        #[serde(deserialize_with = "flag")]
        featured: bool,
        #[serde(deserialize_with = "number")]
        rating: u8,
        #[serde(deserialize_with = "optional_number")]
        age: Option<u32>,
        #[serde(deserialize_with = "date")]
        day: Option<NaiveDate>,
    }

    fn form(value: Value) -> Result<Form, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_form_shapes_are_accepted() {
        let parsed = form(json!({
            "label": null,
            "tags": "Rust, CLI",
            "featured": "true",
            "rating": "4",
            "age": "25",
            "day": "2025-06-14T09:30:00.000Z"
        }))
        .unwrap();

        assert_eq!(parsed.label, "");
        assert_eq!(parsed.tags, vec!["Rust", "CLI"]);
        assert!(parsed.featured);
        assert_eq!(parsed.rating, 4);
        assert_eq!(parsed.age, Some(25));
        assert_eq!(parsed.day, NaiveDate::from_ymd_opt(2025, 6, 14));
    }

    #[test]
    fn test_empty_values_fall_back() {
        let parsed = form(json!({
            "label": 3.8,
            "tags": ["Go", null, 7],
            "featured": null,
            "rating": 5.0,
            "age": "",
            "day": ""
        }))
        .unwrap();

        assert_eq!(parsed.label, "3.8");
        assert_eq!(parsed.tags, vec!["Go", "7"]);
        assert!(!parsed.featured);
        assert_eq!(parsed.rating, 5);
        assert_eq!(parsed.age, None);
        assert_eq!(parsed.day, None);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(form(json!({ "rating": "lots" })).is_err());
        assert!(form(json!({ "rating": 300 })).is_err());
        assert!(form(json!({ "featured": "sometimes" })).is_err());
        assert!(form(json!({ "day": "yesterday" })).is_err());
        assert!(form(json!({ "label": ["a"] })).is_err());
    }
}
