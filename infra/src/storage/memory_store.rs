//! In-memory session store implementation
//!
//! Keeps the handoff keys in a process-local map. Batched operations apply
//! under one write lock, so a reader never observes a promotion half-done.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use fa_core::errors::DomainError;
use fa_core::repositories::store::{SessionStore, StoreOp};

/// In-memory key-value store for session state
///
/// The client-side analog of browser storage: string keys, string values,
/// last write wins. Construct once and share behind an `Arc`.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of keys currently held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        debug!(key = key, event = "store_set", "Stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        debug!(key = key, event = "store_remove", "Removed value");
        Ok(())
    }

    async fn apply(&self, ops: Vec<StoreOp>) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        let count = ops.len();
        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    entries.insert(key, value);
                }
                StoreOp::Remove { key } => {
                    entries.remove(&key);
                }
            }
        }
        debug!(ops = count, event = "store_apply", "Applied batch");
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.clear();
        debug!(event = "store_clear", "Cleared store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove_round_trip() {
        let store = MemoryStore::new();

        store.set("token", "t1").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), Some("t1".to_string()));
        assert_eq!(store.len().await, 1);

        store.remove("token").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_apply_batch_applies_in_order() {
        let store = MemoryStore::new();
        store.set("tempUser", "{}").await.unwrap();
        store.set("tempPhone", "9876543210").await.unwrap();

        store
            .apply(vec![
                StoreOp::set("user", "{}"),
                StoreOp::set("token", "t1"),
                StoreOp::remove("tempUser"),
                StoreOp::remove("tempPhone"),
            ])
            .await
            .unwrap();

        assert_eq!(store.get("user").await.unwrap(), Some("{}".to_string()));
        assert_eq!(store.get("token").await.unwrap(), Some("t1".to_string()));
        assert_eq!(store.get("tempUser").await.unwrap(), None);
        assert_eq!(store.get("tempPhone").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_remove_in_one_batch_removes() {
        let store = MemoryStore::new();
        store
            .apply(vec![StoreOp::set("key", "v"), StoreOp::remove("key")])
            .await
            .unwrap();
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = MemoryStore::new();
        store.set("user", "{}").await.unwrap();
        store.set("token", "t1").await.unwrap();

        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }
}
