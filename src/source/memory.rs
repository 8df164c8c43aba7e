//! In-memory data source — fixed documents or fixed failures per path.
//!
//! Used by tests and demos. Documents can be swapped between fetches to
//! simulate upstream data changing under a reload.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::DataSource;
use crate::catalog::error::{LoadError, LoadResult};

#[derive(Debug, Clone)]
enum Entry {
    Json(Value),
    Status(u16),
}

/// Shared-handle in-memory source. Clones see the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
    fetches: Arc<AtomicUsize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: serve `value` at `path`.
    pub fn with_json(self, path: &str, value: Value) -> Self {
        self.set_json(path, value);
        self
    }

    /// Builder: fail `path` with an HTTP-style status.
    pub fn with_status(self, path: &str, status: u16) -> Self {
        self.set_status(path, status);
        self
    }

    pub fn set_json(&self, path: &str, value: Value) {
        self.insert(path, Entry::Json(value));
    }

    pub fn set_status(&self, path: &str, status: u16) {
        self.insert(path, Entry::Status(status));
    }

    /// Total fetches served (successful or not).
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn insert(&self, path: &str, entry: Entry) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(path.to_string(), entry);
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self, path: &str) -> LoadResult<Value> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let entry = {
            let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
            entries.get(path).cloned()
        };
        match entry {
            Some(Entry::Json(value)) => Ok(value),
            Some(Entry::Status(status)) => Err(LoadError::Status {
                path: path.to_string(),
                status,
            }),
            None => Err(LoadError::Status {
                path: path.to_string(),
                status: 404,
            }),
        }
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_path_is_404() {
        let source = MemorySource::new();
        let err = source.fetch("nope.json").await.unwrap_err();
        assert_eq!(
            err,
            LoadError::Status {
                path: "nope.json".into(),
                status: 404
            }
        );
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn clones_share_documents() {
        let source = MemorySource::new().with_json("a.json", json!({ "v": 1 }));
        let other = source.clone();
        other.set_json("a.json", json!({ "v": 2 }));
        assert_eq!(source.fetch("a.json").await.unwrap()["v"], 2);
    }
}
