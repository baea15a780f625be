use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::kv::KvBackend;

/// Load-mutate-save workflow over whole collections. A collection is one
/// JSON array stored under one key; there is no row-level access.
///
/// Reads never fail: a backend fault degrades to the last snapshot this
/// process saw, defaulting to an empty collection. Writes report failure
/// as `false` so the HTTP layer can surface a 500 without losing the
/// caller's in-process copy.
pub struct RecordStore {
    backend: Box<dyn KvBackend>,
    snapshots: Mutex<HashMap<String, Value>>,
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl RecordStore {
    pub fn new(backend: Box<dyn KvBackend>) -> Self {
        Self {
            backend,
            snapshots: Mutex::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Serializes the load-mutate-save sequence of writers on one
    /// collection key. Whole-collection writes would otherwise lose
    /// updates when two requests race on the same key. Readers skip it.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut locks = self.locks.lock().unwrap();
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        mutex.lock_owned().await
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let value = match self.backend.get(key).await {
            Ok(Some(value)) => {
                self.remember(key, value.clone());
                value
            }
            Ok(None) => self.snapshot(key),
            Err(e) => {
                tracing::warn!(key, error = %e, "backend read failed, using in-memory snapshot");
                self.snapshot(key)
            }
        };

        match serde_json::from_value(value) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(key, error = %e, "stored collection is not decodable, treating as empty");
                Vec::new()
            }
        }
    }

    pub async fn save<T: Serialize>(&self, key: &str, records: &[T]) -> bool {
        let value = match serde_json::to_value(records) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to encode collection");
                return false;
            }
        };

        match self.backend.set(key, value.clone()).await {
            Ok(()) => {
                self.remember(key, value);
                true
            }
            Err(e) => {
                tracing::error!(key, error = %e, "backend write failed");
                false
            }
        }
    }

    fn snapshot(&self, key: &str) -> Value {
        self.snapshots
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    fn remember(&self, key: &str, value: Value) {
        self.snapshots.lock().unwrap().insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::memory::MemoryKv;
    use async_trait::async_trait;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        note: String,
    }

    fn item(id: &str, note: &str) -> Item {
        Item {
            id: id.to_string(),
            note: note.to_string(),
        }
    }

    struct FailingKv;

    #[async_trait]
    impl KvBackend for FailingKv {
        async fn get(&self, _key: &str) -> anyhow::Result<Option<Value>> {
            anyhow::bail!("connection refused")
        }

        async fn set(&self, _key: &str, _value: Value) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn round_trip_preserves_records_and_order() {
        let store = RecordStore::new(Box::new(MemoryKv::new()));
        let items = vec![item("a", "first"), item("b", "second"), item("c", "third")];

        assert!(store.save("items", &items).await);
        let loaded: Vec<Item> = store.load("items").await;
        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn load_defaults_to_empty() {
        let store = RecordStore::new(Box::new(MemoryKv::new()));
        let loaded: Vec<Item> = store.load("items").await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn read_fault_degrades_to_empty() {
        let store = RecordStore::new(Box::new(FailingKv));
        let loaded: Vec<Item> = store.load("items").await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn write_fault_reports_false() {
        let store = RecordStore::new(Box::new(FailingKv));
        assert!(!store.save("items", &[item("a", "first")]).await);
    }

    #[tokio::test]
    async fn undecodable_blob_treated_as_empty() {
        let backend = MemoryKv::new();
        backend
            .set("items", Value::String("not an array".into()))
            .await
            .unwrap();
        let store = RecordStore::new(Box::new(backend));
        let loaded: Vec<Item> = store.load("items").await;
        assert!(loaded.is_empty());
    }
}
