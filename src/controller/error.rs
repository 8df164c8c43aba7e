//! Controller error types.

use thiserror::Error;

use crate::catalog::error::{EmptyDataError, LoadError};

/// Terminal outcome of one load attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    EmptyData(#[from] EmptyDataError),
}

/// A selection request the current state cannot honour. State is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("data not loaded")]
    NotLoaded,

    #[error("unknown LOB: {0}")]
    UnknownLob(String),

    #[error("no LOB selected")]
    NoLobSelected,

    #[error("app {app} is not under LOB {lob}")]
    AppNotInLob { lob: String, app: String },
}
