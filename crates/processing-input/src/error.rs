//! Error types for the processing-input crate.

use file_validation::{FileFamily, FileNameError};
use thiserror::Error;

/// Errors that can occur while building, decoding or fetching processing inputs.
#[derive(Error, Debug)]
pub enum ProcessingInputError {
    #[error(transparent)]
    FileName(#[from] FileNameError),

    #[error("A processing input needs at least one file")]
    Empty,

    #[error("{filename} is a {found} file, expected {expected}")]
    WrongFamily {
        filename: String,
        expected: FileFamily,
        found: FileFamily,
    },

    #[error("All inputs must come from the same source: expected {expected}, found {found} in {filename}")]
    MixedSources {
        filename: String,
        expected: String,
        found: String,
    },

    #[error("Unknown data type {0}. Expected a science data level, 'ancillary' or 'spice'")]
    UnknownDataType(String),

    #[error("Entry tagged {tag} reconstructed as {actual}")]
    DataTypeMismatch { tag: String, actual: String },

    #[error("Invalid processing input payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to fetch {filename}: {source}")]
    Fetch {
        filename: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for processing-input operations.
pub type Result<T> = std::result::Result<T, ProcessingInputError>;
