//! Ancillary product filenames.
//!
//! Convention:
//! `<mission>_<instrument>_<descriptor>_<startdate>(-<enddate>)_<version>.<extension>`
//!
//! The end date is optional; without one a file stays valid until a file with
//! a later start date supersedes it.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use imap_common::{
    parse_date, DateRange, Instrument, Version, ANCILLARY_FILENAME_CONVENTION, MISSION,
    VALID_ANCILLARY_FILE_EXTENSIONS,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FileNameError, Result};
use crate::file_path::{under_root, FileFamily};

// The pattern admits csv and json; validation narrows that to VALID_ANCILLARY_FILE_EXTENSIONS.
static ANCILLARY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<mission>imap)_(?P<instrument>[^_]+)_(?P<descriptor>[^_]+)_(?P<start_date>\d{8})(-(?P<end_date>\d{8}))?_(?P<version>v\d{3})\.(?P<extension>cdf|csv|json)$",
    )
    .expect("ancillary filename pattern is valid")
});

/// Raw fields pulled out of an ancillary filename before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncillaryComponents {
    pub mission: String,
    pub instrument: String,
    pub descriptor: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub version: String,
    pub extension: String,
}

/// A validated ancillary filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncillaryFilePath {
    filename: String,
    instrument: Instrument,
    descriptor: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    version: Version,
    extension: String,
}

impl AncillaryFilePath {
    /// Parse and validate an ancillary filename. Leading directories are ignored.
    pub fn new(filename: &str) -> Result<Self> {
        let filename = crate::bare_filename(filename);
        let components = Self::extract_filename_components(filename)?;
        Self::validate(filename, components)
    }

    /// Build a filename from its parts, then parse it back.
    pub fn generate_from_inputs(
        instrument: &str,
        descriptor: &str,
        start_date: &str,
        end_date: Option<&str>,
        version: &str,
        extension: &str,
    ) -> Result<Self> {
        let time_field = match end_date {
            Some(end) => format!("{start_date}-{end}"),
            None => start_date.to_string(),
        };
        let filename =
            format!("{MISSION}_{instrument}_{descriptor}_{time_field}_{version}.{extension}");
        Self::new(&filename)
    }

    /// Pull raw fields out of a filename without checking them.
    pub fn extract_filename_components(filename: &str) -> Result<AncillaryComponents> {
        let caps = ANCILLARY_PATTERN
            .captures(filename)
            .ok_or_else(|| FileNameError::Syntax {
                family: FileFamily::Ancillary,
                filename: filename.to_string(),
                convention: ANCILLARY_FILENAME_CONVENTION,
            })?;

        let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        Ok(AncillaryComponents {
            mission: field("mission").unwrap_or_default(),
            instrument: field("instrument").unwrap_or_default(),
            descriptor: field("descriptor").unwrap_or_default(),
            start_date: field("start_date").unwrap_or_default(),
            end_date: field("end_date"),
            version: field("version").unwrap_or_default(),
            extension: field("extension").unwrap_or_default(),
        })
    }

    fn validate(filename: &str, raw: AncillaryComponents) -> Result<Self> {
        let mut violations = Vec::new();

        if raw.mission != MISSION {
            violations.push(format!("Invalid mission {}. Please use {MISSION}", raw.mission));
        }

        let instrument = Instrument::from_str(&raw.instrument)
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        if !VALID_ANCILLARY_FILE_EXTENSIONS.contains(&raw.extension.as_str()) {
            violations.push(format!(
                "Invalid extension {}. Extension should be {}",
                raw.extension,
                VALID_ANCILLARY_FILE_EXTENSIONS.join(", ")
            ));
        }

        let start_date = parse_date(&raw.start_date)
            .map_err(|_| {
                violations.push(format!(
                    "Invalid start date {}. Please use YYYYMMDD format",
                    raw.start_date
                ))
            })
            .ok();

        let end_date = match raw.end_date.as_deref() {
            None => None,
            Some(end) => parse_date(end)
                .map_err(|_| {
                    violations.push(format!(
                        "Invalid end date {end}. Please use YYYYMMDD format"
                    ))
                })
                .ok(),
        };

        let version = Version::from_str(&raw.version)
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        match (instrument, start_date, version) {
            (Some(instrument), Some(start_date), Some(version)) if violations.is_empty() => {
                Ok(Self {
                    filename: filename.to_string(),
                    instrument,
                    descriptor: raw.descriptor,
                    start_date,
                    end_date,
                    version,
                    extension: raw.extension,
                })
            }
            _ => Err(FileNameError::Validation {
                family: FileFamily::Ancillary,
                filename: filename.to_string(),
                violations,
            }),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mission(&self) -> &str {
        MISSION
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Validity window: start date through end date, or the start date alone.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date.unwrap_or(self.start_date))
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `<root>/imap/ancillary/<instrument>/<filename>`
    pub fn construct_path(&self, archive_root: Option<&Path>) -> PathBuf {
        let relative = PathBuf::from(MISSION)
            .join("ancillary")
            .join(self.instrument.as_str())
            .join(&self.filename);
        under_root(archive_root, relative)
    }
}

impl FromStr for AncillaryFilePath {
    type Err = FileNameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
