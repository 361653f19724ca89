//! Common types and utilities shared across the IMAP data access crates.

pub mod config;
pub mod error;
pub mod mission;
pub mod time;
pub mod version;

pub use config::ArchiveConfig;
pub use error::{ConfigError, ParseError};
pub use mission::{
    DataLevel, Instrument, ANCILLARY_FILENAME_CONVENTION, FILENAME_CONVENTION, MISSION,
    VALID_ANCILLARY_FILE_EXTENSIONS, VALID_FILE_EXTENSIONS,
};
pub use time::{format_date, is_valid_date, parse_date, DateRange};
pub use version::{is_valid_repointing, is_valid_version, Version, VersionFilter};
