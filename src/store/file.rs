//! Directory-backed session store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

use super::SessionStore;

/// One slot as written to disk.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSlot {
    key: String,
    value: String,
}

/// Session store that writes each slot to its own JSON file.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a new file store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the store directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the store directory exists.
    fn ensure_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create draft store at {:?}", self.root))
    }

    /// Get the file path for a slot key.
    fn slot_path(&self, key: &str) -> PathBuf {
        let hash = Sha256::digest(key.as_bytes());
        self.root.join(format!("{}.json", hex::encode(&hash[..16])))
    }

    fn read_slot(path: &Path) -> anyhow::Result<StoredSlot> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read draft slot {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Corrupt draft slot {:?}", path))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let slot = Self::read_slot(&path)?;
        Ok(Some(slot.value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        let path = self.slot_path(key);
        let json = serde_json::to_string(&StoredSlot {
            key: key.to_string(),
            value: value.to_string(),
        })
        .context("Failed to serialize draft slot")?;

        // Write to temp file, then rename, so readers never see half a slot
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write draft slot {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace draft slot {:?}", path))?;

        tracing::debug!("Stored draft slot {} at {:?}", key, path);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(slot) = Self::read_slot(&path) {
                    keys.push(slot.key);
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_set_and_get() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("drafts"));

        store.set("data-form-event-field", r#"{"a":1}"#).unwrap();

        let loaded = store.get("data-form-event-field").unwrap();
        assert_eq!(loaded, Some(r#"{"a":1}"#.to_string()));
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("drafts"));

        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn file_store_overwrites_slot() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap(), Some("second".to_string()));
        assert_eq!(store.keys().unwrap(), vec!["k"]);
    }

    #[test]
    fn file_store_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        store.set("k", "v").unwrap();

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn file_store_keys_lists_original_keys() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        store.set("data-form-b", "1").unwrap();
        store.set("data-form-a", "2").unwrap();

        assert_eq!(store.keys().unwrap(), vec!["data-form-a", "data-form-b"]);
    }

    #[test]
    fn file_store_keys_on_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("never-created"));

        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn file_store_corrupt_slot_is_error() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        store.set("k", "v").unwrap();

        fs::write(store.slot_path("k"), "not json").unwrap();

        assert!(store.get("k").is_err());
    }

    #[test]
    fn slot_path_is_deterministic() {
        let store = FileStore::new("/tmp/drafts");
        assert_eq!(store.slot_path("a"), store.slot_path("a"));
        assert_ne!(store.slot_path("a"), store.slot_path("b"));
    }
}
