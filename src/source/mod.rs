//! Data sources — where the three JSON tables come from.
//!
//! A source only knows how to fetch one document by path. Batching,
//! validation, and fail-fast semantics live in [`crate::catalog`].

pub mod dir;
pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::catalog::error::LoadResult;

pub use dir::DirSource;
pub use http::HttpSource;
pub use memory::MemorySource;

/// Read-only JSON document store addressed by stable paths.
///
/// Every fetch must return current content: implementations never cache.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch and parse the document at `path`.
    async fn fetch(&self, path: &str) -> LoadResult<Value>;

    /// Human-readable location, for logs and the status line.
    fn describe(&self) -> String;
}
