//! Storage Module
//!
//! This module provides session store implementations backing the keys the
//! client keeps account state under. The in-memory store is the only
//! backend; it mirrors the behavior of a browser's key-value storage,
//! including batched writes that apply atomically.

pub mod memory_store;

// Re-export commonly used types
pub use memory_store::MemoryStore;
