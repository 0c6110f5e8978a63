//! Shallow JSON patches
//!
//! Records are edited with partial objects: every key present in the patch
//! replaces the field of the same name, everything else is kept. Merging goes
//! through `serde_json::Value` so typed records and their open-ended extra
//! fields are handled the same way.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A partial record: field name to new value
pub type Patch = Map<String, Value>;

/// Right-biased shallow merge of `patch` onto `current`
pub fn merge<T>(current: &T, patch: &Patch) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut fields = match serde_json::to_value(current)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merge_into(&mut fields, patch);
    serde_json::from_value(Value::Object(fields))
}

/// Copy every entry of `patch` over `target`
pub fn merge_into(target: &mut Patch, patch: &Patch) {
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
}

/// Unwrap a JSON object; anything else becomes an empty patch
pub fn into_object(value: Value) -> Patch {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    #[test]
    fn test_merge_replaces_only_patched_fields() {
        let current = Record {
            name: "a".to_string(),
            count: 1,
        };
        let patch = into_object(json!({ "count": 5 }));

        let merged = merge(&current, &patch).unwrap();
        assert_eq!(
            merged,
            Record {
                name: "a".to_string(),
                count: 5
            }
        );
    }

    #[test]
    fn test_merge_rejects_wrong_types() {
        let current = Record {
            name: "a".to_string(),
            count: 1,
        };
        let patch = into_object(json!({ "count": "many" }));

        assert!(merge(&current, &patch).is_err());
    }

    #[test]
    fn test_into_object_ignores_non_objects() {
        assert!(into_object(json!([1, 2])).is_empty());
        assert_eq!(into_object(json!({ "a": 1 })).len(), 1);
    }
}
