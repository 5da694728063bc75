//! Mock implementation of SessionStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DomainError, SessionError};

use super::trait_::{SessionStore, StoreOp};

/// Mock session store for testing
///
/// Keeps entries in memory and counts boundary calls so tests can assert
/// how often the store was actually hit. A failure toggle makes every
/// subsequent call fail the way an unavailable backend would.
pub struct MockSessionStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    should_fail: Arc<RwLock<bool>>,
    apply_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl MockSessionStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(RwLock::new(false)),
            apply_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent call fail (or succeed again)
    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    /// Number of `apply` batches the store has received
    pub fn apply_calls(&self) -> usize {
        self.apply_calls.load(Ordering::SeqCst)
    }

    /// Number of individual `set`/`remove` calls the store has received
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored entries for assertions
    pub async fn contents(&self) -> HashMap<String, String> {
        self.entries.read().await.clone()
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.read().await {
            return Err(SessionError::StoreFailure {
                message: "simulated storage failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.check_failure().await?;
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.check_failure().await?;
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.check_failure().await?;
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }

    async fn apply(&self, ops: Vec<StoreOp>) -> Result<(), DomainError> {
        // Fail before touching anything so a failed batch leaves no trace
        self.check_failure().await?;
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.write().await;
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
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.check_failure().await?;
        let mut entries = self.entries.write().await;
        entries.clear();
        Ok(())
    }
}
