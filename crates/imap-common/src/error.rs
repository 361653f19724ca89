//! Error types for mission value parsing and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to parse a single mission value (instrument, level, date, version).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid instrument {0}. Please choose from {}", crate::Instrument::names().join(", "))]
    UnknownInstrument(String),

    #[error("Invalid data level {0}. Please choose from {}", crate::DataLevel::names().join(", "))]
    UnknownDataLevel(String),

    #[error("Invalid date {0}. Please use YYYYMMDD format")]
    InvalidDate(String),

    #[error("Invalid version {0}. Please use vXXX format")]
    InvalidVersion(String),
}

/// Failure to load an [`ArchiveConfig`](crate::ArchiveConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to resolve working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}
