//! Error types for filename classification.

use thiserror::Error;

use crate::file_path::FileFamily;

/// Errors raised while parsing or validating a filename.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileNameError {
    /// The name does not fit the family's raw pattern at all.
    #[error("Filename {filename} does not match expected pattern: {convention}")]
    Syntax {
        family: FileFamily,
        filename: String,
        convention: &'static str,
    },

    /// The pattern matched but one or more fields failed validation.
    #[error("Invalid {family} file {filename}:\n{}", .violations.join("\n"))]
    Validation {
        family: FileFamily,
        filename: String,
        violations: Vec<String>,
    },

    #[error(
        "Invalid SPICE file {filename}. Expected file to have one of the following extensions: {}",
        crate::spice::known_extensions().join(", ")
    )]
    UnknownSpiceExtension { filename: String },

    /// None of the three conventions accepted the name.
    #[error(
        "Invalid file type for {filename}. It does not match SPICE, Science or Ancillary file formats:\n{}",
        .attempts.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n")
    )]
    Unclassified {
        filename: String,
        attempts: Vec<FileNameError>,
    },
}

impl FileNameError {
    pub fn filename(&self) -> &str {
        match self {
            FileNameError::Syntax { filename, .. }
            | FileNameError::Validation { filename, .. }
            | FileNameError::UnknownSpiceExtension { filename }
            | FileNameError::Unclassified { filename, .. } => filename,
        }
    }

    /// Every field-level violation reported, empty for syntax-level failures.
    pub fn violations(&self) -> &[String] {
        match self {
            FileNameError::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// Result type for filename operations.
pub type Result<T> = std::result::Result<T, FileNameError>;
