//! In-memory key-value storage
//!
//! Clones share the same underlying map, so a store handed to one component
//! and later reopened by another sees the same entries. This is how a page
//! reload is simulated in tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::error::StorageResult;
use super::{validate_key, KeyValueStore};

/// Process-local key-value store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently stored, in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let mut first = MemoryStore::new();
        let second = first.clone();

        first.set("portfolioData", "{}").unwrap();
        assert_eq!(second.get("portfolioData").unwrap().as_deref(), Some("{}"));
        assert_eq!(second.keys(), vec!["portfolioData".to_string()]);
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::new();
        store.set("authToken", "\"t\"").unwrap();
        store.remove("authToken").unwrap();
        assert!(store.get("authToken").unwrap().is_none());
    }
}
