//! # Key/Value Storage Contract
//!
//! The single persistence seam of the client: string keys to string
//! values, no transactions across keys, no encryption.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   auth / theme / stripe / cart stores      InventoryApi                 │
//! │              │ PersistedSlice                   │                       │
//! │              └──────────────┬───────────────────┘                       │
//! │                             ▼                                           │
//! │                 dyn KeyValueStorage                                     │
//! │                 ┌───────────┴───────────┐                               │
//! │          Database (SQLite)       MemoryStorage                          │
//! │          app runs                tests, throwaway sessions              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::StoreResult;

/// Async get/set/remove over string keys.
///
/// A missing key is `Ok(None)`, never an error.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Inserts or overwrites `key`.
    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`; removing a missing key succeeds.
    async fn remove_item(&self, key: &str) -> StoreResult<()>;

    /// All keys currently stored, sorted. Diagnostics only.
    async fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Shared handle used by every store.
pub type SharedStorage = Arc<dyn KeyValueStorage>;

// =============================================================================
// In-Memory Storage
// =============================================================================

/// `HashMap`-backed storage. Contents vanish with the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a fresh instance as a [`SharedStorage`].
    pub fn shared() -> SharedStorage {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.items
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.items.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.items.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get_item("missing").await.unwrap(), None);

        storage.set_item("b", "2").await.unwrap();
        storage.set_item("a", "1").await.unwrap();
        storage.set_item("a", "one").await.unwrap();

        assert_eq!(storage.get_item("a").await.unwrap().as_deref(), Some("one"));
        assert_eq!(storage.keys().await.unwrap(), vec!["a", "b"]);

        storage.remove_item("a").await.unwrap();
        storage.remove_item("never-there").await.unwrap();
        assert_eq!(storage.keys().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("k", "v").await.unwrap();
        assert_eq!(other.get_item("k").await.unwrap().as_deref(), Some("v"));
    }
}
