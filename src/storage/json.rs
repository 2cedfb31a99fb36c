//! JSON-file-backed storage area.
//!
//! `JsonFileArea` persists a flat string map to a single JSON file. Every
//! mutation rewrites the whole file; an absent or unparseable file is treated
//! as empty so a corrupted store degrades to "no decision recorded" instead
//! of failing the page.
//!
//! File writes are not atomic. The data set here is two short keys, so the
//! whole-file rewrite is not a concern.

use crate::storage::area::StorageArea;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// A storage area persisted to a JSON file on disk.
pub struct JsonFileArea {
    path: PathBuf,
    map: Mutex<HashMap<String, String>>,
}

impl JsonFileArea {
    /// Opens (or creates) a JSON storage area at `path`.
    ///
    /// An existing file that fails to parse is treated as empty rather than
    /// an error; the next write replaces it.
    pub fn open(path: PathBuf) -> Result<Self> {
        let map = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("ignoring unparseable storage file {}: {e}", path.display());
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path,
            map: Mutex::new(map),
        })
    }

    fn persist(&self, map: &HashMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing storage file {}", self.path.display()))
    }
}

impl StorageArea for JsonFileArea {
    fn get_item(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .map
            .lock()
            .map_err(|e| anyhow::anyhow!("storage lock poisoned: {e}"))?;
        map.insert(key.to_string(), value.to_string());
        self.persist(&map)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut map = self
            .map
            .lock()
            .map_err(|e| anyhow::anyhow!("storage lock poisoned: {e}"))?;
        map.remove(key);
        self.persist(&map)
    }

    fn clear(&self) -> Result<()> {
        let mut map = self
            .map
            .lock()
            .map_err(|e| anyhow::anyhow!("storage lock poisoned: {e}"))?;
        map.clear();
        self.persist(&map)
    }

    fn len(&self) -> usize {
        self.map.lock().map(|m| m.len()).unwrap_or(0)
    }

    fn keys(&self) -> Vec<String> {
        let mut v: Vec<String> = self
            .map
            .lock()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        v.sort_unstable();
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        {
            let area = JsonFileArea::open(path.clone()).unwrap();
            area.set_item("gp_consent_prefs", r#"{"statistics":true,"marketing":false}"#)
                .unwrap();
            area.set_item("gp_consent_set", "true").unwrap();
        }

        let area = JsonFileArea::open(path).unwrap();
        assert_eq!(area.len(), 2);
        assert_eq!(area.get_item("gp_consent_set").as_deref(), Some("true"));
    }

    #[test]
    fn corrupted_file_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json!").unwrap();

        let area = JsonFileArea::open(path.clone()).unwrap();
        assert_eq!(area.len(), 0);
        assert!(area.get_item("gp_consent_set").is_none());

        // the next write replaces the corrupted file
        area.set_item("k", "v").unwrap();
        let reopened = JsonFileArea::open(path).unwrap();
        assert_eq!(reopened.get_item("k").as_deref(), Some("v"));
    }

    #[test]
    fn missing_file_is_empty_until_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let area = JsonFileArea::open(path.clone()).unwrap();
        assert!(area.is_empty());
        assert!(!path.exists());

        area.set_item("a", "1").unwrap();
        assert!(path.exists());
    }
}
