//! Classification of filenames into one of the three conventions.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use imap_common::{DataLevel, DateRange, Instrument, Version};
use tracing::debug;

use crate::ancillary::AncillaryFilePath;
use crate::error::{FileNameError, Result};
use crate::science::ScienceFilePath;
use crate::spice::SpiceFilePath;

/// The naming convention a file follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFamily {
    Science,
    Ancillary,
    Spice,
}

impl FileFamily {
    /// Order in which [`classify`] tries the conventions. SPICE is a table
    /// lookup, so it goes first.
    pub const CLASSIFICATION_ORDER: [FileFamily; 3] =
        [FileFamily::Spice, FileFamily::Science, FileFamily::Ancillary];

    /// Parse `filename` under this convention only.
    pub fn parse(&self, filename: &str) -> Result<ImapFilePath> {
        match self {
            FileFamily::Spice => SpiceFilePath::new(filename).map(ImapFilePath::Spice),
            FileFamily::Science => ScienceFilePath::new(filename).map(ImapFilePath::Science),
            FileFamily::Ancillary => AncillaryFilePath::new(filename).map(ImapFilePath::Ancillary),
        }
    }
}

impl fmt::Display for FileFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFamily::Science => "science",
            FileFamily::Ancillary => "ancillary",
            FileFamily::Spice => "SPICE",
        };
        f.write_str(name)
    }
}

/// A filename validated against one of the three conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImapFilePath {
    Science(ScienceFilePath),
    Ancillary(AncillaryFilePath),
    Spice(SpiceFilePath),
}

/// Decide which convention `filename` follows and validate it.
///
/// Conventions are tried in [`FileFamily::CLASSIFICATION_ORDER`] and the first
/// success wins. When none accept the name, the error carries every attempt's
/// failure in that order.
pub fn classify(filename: &str) -> Result<ImapFilePath> {
    let mut attempts = Vec::with_capacity(FileFamily::CLASSIFICATION_ORDER.len());

    for family in FileFamily::CLASSIFICATION_ORDER {
        match family.parse(filename) {
            Ok(path) => return Ok(path),
            Err(e) => {
                debug!(filename = %filename, family = %family, error = %e, "Filename rejected");
                attempts.push(e);
            }
        }
    }

    Err(FileNameError::Unclassified {
        filename: crate::bare_filename(filename).to_string(),
        attempts,
    })
}

impl ImapFilePath {
    pub fn family(&self) -> FileFamily {
        match self {
            ImapFilePath::Science(_) => FileFamily::Science,
            ImapFilePath::Ancillary(_) => FileFamily::Ancillary,
            ImapFilePath::Spice(_) => FileFamily::Spice,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            ImapFilePath::Science(p) => p.filename(),
            ImapFilePath::Ancillary(p) => p.filename(),
            ImapFilePath::Spice(p) => p.filename(),
        }
    }

    /// Instrument for science and ancillary files; SPICE kernels have none.
    pub fn instrument(&self) -> Option<Instrument> {
        match self {
            ImapFilePath::Science(p) => Some(p.instrument()),
            ImapFilePath::Ancillary(p) => Some(p.instrument()),
            ImapFilePath::Spice(_) => None,
        }
    }

    pub fn descriptor(&self) -> Option<&str> {
        match self {
            ImapFilePath::Science(p) => Some(p.descriptor()),
            ImapFilePath::Ancillary(p) => Some(p.descriptor()),
            ImapFilePath::Spice(_) => None,
        }
    }

    pub fn data_level(&self) -> Option<DataLevel> {
        match self {
            ImapFilePath::Science(p) => Some(p.data_level()),
            _ => None,
        }
    }

    pub fn version(&self) -> Option<Version> {
        match self {
            ImapFilePath::Science(p) => Some(p.version()),
            ImapFilePath::Ancillary(p) => Some(p.version()),
            ImapFilePath::Spice(_) => None,
        }
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.date_range().map(|range| range.start)
    }

    /// Dates covered by the file. Science files cover their start date, ancillary
    /// files their validity window, SPICE kernels carry no dates.
    pub fn date_range(&self) -> Option<DateRange> {
        match self {
            ImapFilePath::Science(p) => Some(DateRange::single(p.start_date())),
            ImapFilePath::Ancillary(p) => Some(p.date_range()),
            ImapFilePath::Spice(_) => None,
        }
    }

    /// Archive location of the file, under `archive_root` when one is given.
    pub fn construct_path(&self, archive_root: Option<&Path>) -> PathBuf {
        match self {
            ImapFilePath::Science(p) => p.construct_path(archive_root),
            ImapFilePath::Ancillary(p) => p.construct_path(archive_root),
            ImapFilePath::Spice(p) => p.construct_path(archive_root),
        }
    }
}

impl FromStr for ImapFilePath {
    type Err = FileNameError;

    fn from_str(s: &str) -> Result<Self> {
        classify(s)
    }
}

impl fmt::Display for ImapFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filename())
    }
}

/// Prefix `relative` with the archive root. A missing or empty root leaves the
/// path relative.
pub(crate) fn under_root(archive_root: Option<&Path>, relative: PathBuf) -> PathBuf {
    match archive_root {
        Some(root) if !root.as_os_str().is_empty() => root.join(relative),
        _ => relative,
    }
}
