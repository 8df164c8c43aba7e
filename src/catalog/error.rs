//! Load-specific error types.

use thiserror::Error;

/// Failure of one load batch. Any single resource failing aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Failed to load {path}: HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("Failed to load {path}: {message}")]
    Transport { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("No LOB data found ({path} missing or invalid): {reason}")]
    Malformed { path: String, reason: String },
}

impl LoadError {
    /// Path of the resource that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::Status { path, .. }
            | Self::Transport { path, .. }
            | Self::Parse { path, .. }
            | Self::Malformed { path, .. } => path,
        }
    }
}

/// The LOB resource parsed but holds zero entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("LOB list is empty. Check {path} content.")]
pub struct EmptyDataError {
    pub path: String,
}

pub type LoadResult<T> = Result<T, LoadError>;
