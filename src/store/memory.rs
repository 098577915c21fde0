use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::Result;

/// Process-local store, used by tests and as a throwaway session store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned map is still a consistent map: every write is a single insert
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_set_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", json!([1, 2])).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!([1, 2])));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // Removing twice is fine
        store.remove("k").unwrap();
    }
}
