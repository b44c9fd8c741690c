//! In-memory collection store.
//!
//! The simplest mock-mode backing: a mutex-guarded map of collection key to
//! JSON document. State lives for the process only, which suits tests and
//! short demo sessions; the JSON-file store covers persistence across runs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::StoreError;
use crate::domain::ports::CollectionStore;

/// Process-lifetime key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// An empty store; collections seed themselves on first access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::read(key, "store mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::write(key, "store mutex poisoned"))?;
        entries.insert(key.to_owned(), document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn absent_keys_load_as_none() {
        let store = MemoryStore::new();

        let loaded = store.load("admin_tags_v1").await.expect("load succeeds");

        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let document = json!([{ "id": "tag1" }]);

        store
            .save("admin_tags_v1", &document)
            .await
            .expect("save succeeds");
        let loaded = store.load("admin_tags_v1").await.expect("load succeeds");

        assert_eq!(loaded, Some(document));
    }

    #[tokio::test]
    async fn later_writes_win() {
        let store = MemoryStore::new();

        store
            .save("admin_tags_v1", &json!([1]))
            .await
            .expect("first save");
        store
            .save("admin_tags_v1", &json!([2]))
            .await
            .expect("second save");

        let loaded = store.load("admin_tags_v1").await.expect("load succeeds");
        assert_eq!(loaded, Some(json!([2])));
    }
}
