//! Storage layer
//!
//! A small key-value abstraction: every entry is a JSON-serialized blob
//! stored under a named key.
//!
//! ## Backends
//!
//! - **FileStore**: one `<key>.json` file per entry inside the data directory,
//!   written atomically
//! - **MemoryStore**: process-local map, shared between clones
//!
//! Writes are last-write-wins. Two processes editing the same data
//! directory can overwrite each other's changes.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Keys used for persisted entries
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USER_DATA: &str = "userData";
    pub const SETTINGS: &str = "portfolio_settings";
    pub const CONTENT: &str = "portfolioData";
}

/// A persistent string-to-string map
pub trait KeyValueStore {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Check whether a value exists under `key`
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Read and deserialize a JSON value
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::InvalidFormat {
                    key: key.to_string(),
                    details: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Serialize and store a JSON value
    fn set_json<T: Serialize>(&mut self, key: &str, value: &T) -> StorageResult<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set(key, &raw)
    }
}

/// Check that a key can safely name a storage entry
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("portfolio_settings").is_ok());
        assert!(validate_key("authToken").is_ok());
        assert!(validate_key("a-b_c1").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[test]
    fn test_json_helpers() {
        let mut store = MemoryStore::new();
        store.set_json("numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Vec<i32> = store.get_json("numbers").unwrap().unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);

        let missing: Option<Vec<i32>> = store.get_json("missing").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_get_json_reports_invalid_format() {
        let mut store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();

        let result: StorageResult<Option<Vec<i32>>> = store.get_json("broken");
        assert!(matches!(result, Err(StorageError::InvalidFormat { .. })));
    }
}
