//! Native save file
//!
//! Stores every key in a single JSON object, rewritten on each change.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or start) a save file. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = if path.exists() {
            let json = fs::read_to_string(&path)?;
            let items: BTreeMap<String, String> = serde_json::from_str(&json)?;
            log::info!("Loaded {} keys from {}", items.len(), path.display());
            items
        } else {
            log::info!("No save file at {}, starting fresh", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            items: RefCell::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&*self.items.borrow())?;
        fs::write(&self.path, json).map_err(|e| Error::Storage {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

impl KeyValueStore for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.flush(key)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if self.items.borrow_mut().remove(key).is_some() {
            self.flush(key)?;
        }
        Ok(())
    }
}
