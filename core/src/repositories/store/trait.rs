//! Session store trait defining the interface for client-side key-value storage.
//!
//! This module defines the storage boundary the flow writes session state
//! through. The contract mirrors web local storage: string keys, string
//! values, last write wins. The trait is async-first and uses Result types
//! for proper error handling.

use async_trait::async_trait;

use crate::errors::DomainError;

/// A single write against the session store
///
/// Batched writes are expressed as a sequence of these so a whole
/// promotion can be handed to the store as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// Set `key` to `value`, overwriting any previous value
    Set { key: String, value: String },
    /// Remove `key`; removing an absent key is not an error
    Remove { key: String },
}

impl StoreOp {
    /// Convenience constructor for a set operation
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        StoreOp::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Convenience constructor for a remove operation
    pub fn remove(key: impl Into<String>) -> Self {
        StoreOp::Remove { key: key.into() }
    }
}

/// Storage boundary for session state
///
/// This trait defines the contract for the key-value storage the flow keeps
/// its session records in. Implementations should preserve local-storage
/// semantics: string keys and values, last write wins, absent keys read as
/// `None`.
///
/// The one addition over plain local storage is [`apply`]: implementations
/// must apply a batch as a single atomic unit, so a session promotion can
/// never be observed half-done.
///
/// [`apply`]: Self::apply
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use std::collections::HashMap;
/// use std::sync::Mutex;
/// use fa_core::repositories::{SessionStore, StoreOp};
/// use fa_core::errors::DomainError;
///
/// struct InMemory {
///     entries: Mutex<HashMap<String, String>>,
/// }
///
/// #[async_trait]
/// impl SessionStore for InMemory {
///     async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
///         Ok(self.entries.lock().unwrap().get(key).cloned())
///     }
///
///     async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
///         self.entries.lock().unwrap().insert(key.into(), value.into());
///         Ok(())
///     }
///
///     async fn remove(&self, key: &str) -> Result<(), DomainError> {
///         self.entries.lock().unwrap().remove(key);
///         Ok(())
///     }
///
///     async fn apply(&self, ops: Vec<StoreOp>) -> Result<(), DomainError> {
///         let mut entries = self.entries.lock().unwrap();
///         for op in ops {
///             match op {
///                 StoreOp::Set { key, value } => {
///                     entries.insert(key, value);
///                 }
///                 StoreOp::Remove { key } => {
///                     entries.remove(&key);
///                 }
///             }
///         }
///         Ok(())
///     }
///
///     async fn clear(&self) -> Result<(), DomainError> {
///         self.entries.lock().unwrap().clear();
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key present
    /// * `Ok(None)` - Key absent
    /// * `Err(DomainError)` - Storage failure
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Set `key` to `value`, overwriting any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Remove `key` if present
    async fn remove(&self, key: &str) -> Result<(), DomainError>;

    /// Apply a batch of writes as a single atomic unit
    ///
    /// Either every operation in `ops` takes effect or none of them do.
    /// Operations are applied in order, so later writes to the same key win.
    async fn apply(&self, ops: Vec<StoreOp>) -> Result<(), DomainError>;

    /// Remove every key
    async fn clear(&self) -> Result<(), DomainError>;
}
