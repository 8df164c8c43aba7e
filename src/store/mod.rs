//! Persistence stores — string-keyed slots that outlive a session.
//!
//! The picker keeps its last selection in one slot. Stores deal in raw
//! strings; encoding and tolerance of bad content belong to the caller.

pub mod file;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub use file::FileStore;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid slot key: {0:?}")]
    InvalidKey(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Local key-value slot store.
pub trait PersistenceStore: Send + Sync {
    /// Raw slot content. A missing slot is `Ok(None)`.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the slot content.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove the slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// In-process store. Clones share slots; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.read("lobApp").unwrap(), None);

        store.write("lobApp", "{}").unwrap();
        assert_eq!(store.read("lobApp").unwrap().as_deref(), Some("{}"));

        store.remove("lobApp").unwrap();
        assert_eq!(store.read("lobApp").unwrap(), None);
        store.remove("lobApp").unwrap();
    }

    #[test]
    fn memory_store_clones_share_slots() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
    }
}
