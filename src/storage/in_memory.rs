use crate::storage::area::StorageArea;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// In‑memory key/value storage (no persistence). Used as a default when the
/// embedder defines no persistent storage.
#[derive(Default)]
pub struct InMemoryStorageArea {
    map: Mutex<HashMap<String, String>>,
}

impl InMemoryStorageArea {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageArea for InMemoryStorageArea {
    fn get_item(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .lock()
            .map_err(|e| anyhow::anyhow!("storage lock poisoned: {e}"))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.map
            .lock()
            .map_err(|e| anyhow::anyhow!("storage lock poisoned: {e}"))?
            .remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.map
            .lock()
            .map_err(|e| anyhow::anyhow!("storage lock poisoned: {e}"))?
            .clear();
        Ok(())
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
        v.sort_unstable(); // stable order for deterministic tests
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_and_remove() {
        let area = InMemoryStorageArea::new();
        area.set_item("k", "v").unwrap();
        area.set_item("k", "w").unwrap();
        assert_eq!(area.get_item("k").as_deref(), Some("w"));
        assert_eq!(area.len(), 1);

        area.remove_item("k").unwrap();
        assert!(area.get_item("k").is_none());
        // removing again is a no-op
        area.remove_item("k").unwrap();
    }

    #[test]
    fn keys_are_sorted() {
        let area = InMemoryStorageArea::new();
        area.set_item("b", "2").unwrap();
        area.set_item("a", "1").unwrap();
        area.set_item("c", "3").unwrap();
        assert_eq!(area.keys(), vec!["a", "b", "c"]);
    }
}
