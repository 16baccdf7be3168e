// Error types for the task store

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A persisted record could not be decoded
    #[error("Malformed record in {} at line {line}: {reason}", .path.display())]
    Format { path: PathBuf, line: usize, reason: String },

    #[error("Task with ID {0} not found")]
    NotFound(u64),

    #[error("{0}")]
    Validation(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors the caller can report and carry on from
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
