//! Platform abstraction layer
//!
//! Handles browser/native differences for key/value storage:
//! - `MemoryStorage`: in-process map (tests, fallback)
//! - `FileStorage`: JSON file on native targets
//! - `LocalStorage`: browser LocalStorage on wasm32

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::Result;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use web::{LocalStorage, expose_debug_namespace};

/// Synchronous string key/value store, shaped after `window.localStorage`
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Volatile store backed by a sorted map
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries
    pub fn with_items<K: Into<String>, V: Into<String>>(
        items: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self {
            items: RefCell::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.borrow().keys().cloned().collect()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_get_set_remove() {
        let store = MemoryStorage::new();
        assert_eq!(store.get_item("wood_count").unwrap(), None);

        store.set_item("wood_count", "3.000").unwrap();
        assert_eq!(store.get_item("wood_count").unwrap().as_deref(), Some("3.000"));
        assert_eq!(store.len(), 1);

        store.remove_item("wood_count").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_storage_seeded() {
        let store = MemoryStorage::with_items([("a", "1"), ("b", "2")]);
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }
}
