//! Error types for the include-graph engine
//!
//! Only unrecoverable conditions live here. Unresolved includes and
//! link cycles are recorded as [`crate::models::Diagnostic`]s instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum DepError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source file discovered twice: {}", .0.display())]
    DuplicateSource(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl DepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DepError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DepError>;
