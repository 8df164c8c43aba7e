//! Local directory data source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use super::DataSource;
use crate::catalog::error::{LoadError, LoadResult};

/// Reads documents from files under a root directory, fresh on every fetch.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn fetch(&self, path: &str) -> LoadResult<Value> {
        let file = self.root.join(path.trim_start_matches('/'));
        let bytes = match fs::read(&file).await {
            Ok(bytes) => bytes,
            // Same shape as an HTTP 404 so the status line reads identically.
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::Status {
                    path: path.to_string(),
                    status: 404,
                })
            }
            Err(e) => {
                return Err(LoadError::Transport {
                    path: path.to_string(),
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|e| LoadError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
