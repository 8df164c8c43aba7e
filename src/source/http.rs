//! HTTP data source via reqwest.
//!
//! Sends no-cache headers on every request so intermediaries revalidate.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::DataSource;
use crate::catalog::error::{LoadError, LoadResult};

/// Fetches documents relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, path: &str) -> LoadResult<Value> {
        let url = self.url_for(path);
        debug!(%url, "fetching");

        let response = self
            .http
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| LoadError::Transport {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| LoadError::Parse {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
