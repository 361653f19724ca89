//! Error types for the archive client.

use std::path::PathBuf;

use file_validation::FileNameError;
use thiserror::Error;

/// Errors that can occur while talking to the data archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Any failure reaching the API, including non-success status codes.
    #[error("Data access request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    FileName(#[from] FileNameError),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data access URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArchiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArchiveError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;
