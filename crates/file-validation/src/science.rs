//! Science product filenames.
//!
//! Convention:
//! `<mission>_<instrument>_<datalevel>_<descriptor>_<startdate>(-repoint<NNNNN>)_<version>.<extension>`
//!
//! - mission: `imap`
//! - instrument: one of [`Instrument::ALL`]
//! - data level: one of [`DataLevel::ALL`]; `l0` files are `pkts`, everything else `cdf`
//! - descriptor: instrument-chosen product tag, no underscores
//! - start date: earliest date in the file, `YYYYMMDD`
//! - repointing: optional pointing epoch, five digits
//! - version: `vNNN`

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use imap_common::{
    format_date, parse_date, DataLevel, Instrument, Version, FILENAME_CONVENTION, MISSION,
    VALID_FILE_EXTENSIONS,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FileNameError, Result};
use crate::file_path::{under_root, FileFamily};

static SCIENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<mission>imap)_(?P<instrument>[^_]+)_(?P<data_level>[^_]+)_(?P<descriptor>[^_]+)_(?P<start_date>\d{8})(-repoint(?P<repointing>\d{5}))?_(?P<version>v\d{3})\.(?P<extension>cdf|pkts)$",
    )
    .expect("science filename pattern is valid")
});

/// Raw fields pulled out of a science filename before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScienceComponents {
    pub mission: String,
    pub instrument: String,
    pub data_level: String,
    pub descriptor: String,
    pub start_date: String,
    pub repointing: Option<String>,
    pub version: String,
    pub extension: String,
}

/// A validated science filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScienceFilePath {
    filename: String,
    instrument: Instrument,
    data_level: DataLevel,
    descriptor: String,
    start_date: NaiveDate,
    repointing: Option<u32>,
    version: Version,
    extension: String,
}

impl ScienceFilePath {
    /// Parse and validate a science filename. Leading directories are ignored.
    pub fn new(filename: &str) -> Result<Self> {
        let filename = crate::bare_filename(filename);
        let components = Self::extract_filename_components(filename)?;
        Self::validate(filename, components)
    }

    /// Build a filename from its parts, then parse it back.
    ///
    /// The extension follows the data level (`pkts` for `l0`, `cdf` otherwise)
    /// and the repointing, when given, is zero-padded to five digits.
    pub fn generate_from_inputs(
        instrument: &str,
        data_level: &str,
        descriptor: &str,
        start_date: &str,
        version: &str,
        repointing: Option<u32>,
    ) -> Result<Self> {
        let extension = if data_level == DataLevel::L0.as_str() {
            "pkts"
        } else {
            "cdf"
        };
        let mut time_field = start_date.to_string();
        if let Some(repointing) = repointing {
            time_field.push_str(&format!("-repoint{:05}", repointing));
        }

        let filename = format!(
            "{MISSION}_{instrument}_{data_level}_{descriptor}_{time_field}_{version}.{extension}"
        );
        Self::new(&filename)
    }

    /// Pull raw fields out of a filename without checking them.
    pub fn extract_filename_components(filename: &str) -> Result<ScienceComponents> {
        let caps = SCIENCE_PATTERN
            .captures(filename)
            .ok_or_else(|| FileNameError::Syntax {
                family: FileFamily::Science,
                filename: filename.to_string(),
                convention: FILENAME_CONVENTION,
            })?;

        let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string());

        Ok(ScienceComponents {
            mission: field("mission").unwrap_or_default(),
            instrument: field("instrument").unwrap_or_default(),
            data_level: field("data_level").unwrap_or_default(),
            descriptor: field("descriptor").unwrap_or_default(),
            start_date: field("start_date").unwrap_or_default(),
            repointing: field("repointing"),
            version: field("version").unwrap_or_default(),
            extension: field("extension").unwrap_or_default(),
        })
    }

    /// Check every field, collecting all violations before failing.
    fn validate(filename: &str, raw: ScienceComponents) -> Result<Self> {
        let mut violations = Vec::new();

        if raw.mission != MISSION {
            violations.push(format!("Invalid mission {}. Please use {MISSION}", raw.mission));
        }

        let instrument = Instrument::from_str(&raw.instrument)
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        let data_level = DataLevel::from_str(&raw.data_level)
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        let start_date = parse_date(&raw.start_date)
            .map_err(|_| {
                violations.push(format!(
                    "Invalid start date {}. Please use YYYYMMDD format",
                    raw.start_date
                ))
            })
            .ok();

        let version = Version::from_str(&raw.version)
            .map_err(|e| violations.push(e.to_string()))
            .ok();

        let repointing = match raw.repointing.as_deref() {
            None => None,
            Some(digits) if digits.len() == 5 => digits
                .parse::<u32>()
                .map_err(|_| violations.push(repointing_violation(digits)))
                .ok(),
            Some(digits) => {
                violations.push(repointing_violation(digits));
                None
            }
        };

        let expected_extension = if raw.data_level == DataLevel::L0.as_str() {
            "pkts"
        } else {
            "cdf"
        };
        if !VALID_FILE_EXTENSIONS.contains(&raw.extension.as_str())
            || raw.extension != expected_extension
        {
            violations.push(format!(
                "Invalid extension {}. Extension should be pkts for data level l0 and cdf for data level higher than l0",
                raw.extension
            ));
        }

        match (instrument, data_level, start_date, version) {
            (Some(instrument), Some(data_level), Some(start_date), Some(version))
                if violations.is_empty() =>
            {
                Ok(Self {
                    filename: filename.to_string(),
                    instrument,
                    data_level,
                    descriptor: raw.descriptor,
                    start_date,
                    repointing,
                    version,
                    extension: raw.extension,
                })
            }
            _ => Err(FileNameError::Validation {
                family: FileFamily::Science,
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

    pub fn data_level(&self) -> DataLevel {
        self.data_level
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn repointing(&self) -> Option<u32> {
        self.repointing
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `<root>/imap/<instrument>/<level>/<YYYY>/<MM>/<filename>`
    ///
    /// Files are split by calendar month of their start date.
    pub fn construct_path(&self, archive_root: Option<&Path>) -> PathBuf {
        let date = format_date(&self.start_date);
        let relative = PathBuf::from(MISSION)
            .join(self.instrument.as_str())
            .join(self.data_level.as_str())
            .join(&date[..4])
            .join(&date[4..6])
            .join(&self.filename);
        under_root(archive_root, relative)
    }
}

impl FromStr for ScienceFilePath {
    type Err = FileNameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

fn repointing_violation(digits: &str) -> String {
    format!("Invalid repointing {digits}. The repointing number should be a 5 digit integer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_science_file() {
        let path = ScienceFilePath::new("imap_mag_l1a_norm-magi_20240312_v000.cdf").unwrap();
        assert_eq!(path.mission(), "imap");
        assert_eq!(path.instrument(), Instrument::Mag);
        assert_eq!(path.data_level(), DataLevel::L1a);
        assert_eq!(path.descriptor(), "norm-magi");
        assert_eq!(path.start_date(), NaiveDate::from_ymd_opt(2024, 3, 12).unwrap());
        assert_eq!(path.repointing(), None);
        assert_eq!(path.version().to_string(), "v000");
        assert_eq!(path.extension(), "cdf");
    }

    #[test]
    fn test_parse_repointing() {
        let path =
            ScienceFilePath::new("imap_hi_l1c_45sensor-pset_20250415-repoint00012_v001.cdf")
                .unwrap();
        assert_eq!(path.repointing(), Some(12));
        assert_eq!(path.descriptor(), "45sensor-pset");
    }

    #[test]
    fn test_directories_are_stripped() {
        let path = ScienceFilePath::new("/tmp/in/imap_swe_l0_raw_20240101_v002.pkts").unwrap();
        assert_eq!(path.filename(), "imap_swe_l0_raw_20240101_v002.pkts");
    }

    #[test]
    fn test_raw_pattern_mismatch_is_syntax_error() {
        let err = ScienceFilePath::new("imap_mag_l1a_20240312_v000.cdf").unwrap_err();
        assert!(matches!(err, FileNameError::Syntax { .. }));

        let err = ScienceFilePath::new("imap_mag_l1a_burst_20240312_v000.txt").unwrap_err();
        assert!(matches!(err, FileNameError::Syntax { .. }));
    }

    #[test]
    fn test_all_violations_are_reported() {
        let err = ScienceFilePath::new("imap_foo_l9_burst_20240230_v000.pkts").unwrap_err();
        let violations = err.violations();
        assert_eq!(violations.len(), 4, "{violations:?}");
        assert!(violations[0].contains("Invalid instrument foo"));
        assert!(violations[1].contains("Invalid data level l9"));
        assert!(violations[2].contains("Invalid start date 20240230"));
        assert!(violations[3].contains("Invalid extension pkts"));
    }

    #[test]
    fn test_extension_must_follow_level() {
        assert!(ScienceFilePath::new("imap_mag_l0_raw_20240312_v000.pkts").is_ok());
        assert!(ScienceFilePath::new("imap_mag_l0_raw_20240312_v000.cdf").is_err());
        assert!(ScienceFilePath::new("imap_mag_l1a_raw_20240312_v000.pkts").is_err());
    }

    #[test]
    fn test_construct_path() {
        let path = ScienceFilePath::new("imap_mag_l1a_norm-magi_20240312_v000.cdf").unwrap();
        assert_eq!(
            path.construct_path(Some(Path::new("/data"))),
            PathBuf::from("/data/imap/mag/l1a/2024/03/imap_mag_l1a_norm-magi_20240312_v000.cdf")
        );
        assert_eq!(
            path.construct_path(None),
            PathBuf::from("imap/mag/l1a/2024/03/imap_mag_l1a_norm-magi_20240312_v000.cdf")
        );
    }

    #[test]
    fn test_generate_from_inputs() {
        let path = ScienceFilePath::generate_from_inputs(
            "mag", "l0", "raw", "20240213", "v001", None,
        )
        .unwrap();
        assert_eq!(path.filename(), "imap_mag_l0_raw_20240213_v001.pkts");

        let path = ScienceFilePath::generate_from_inputs(
            "ultra", "l1c", "90sensor-pset", "20250101", "v003", Some(7),
        )
        .unwrap();
        assert_eq!(
            path.filename(),
            "imap_ultra_l1c_90sensor-pset_20250101-repoint00007_v003.cdf"
        );
    }

    #[test]
    fn test_generate_rejects_invalid_inputs() {
        let err = ScienceFilePath::generate_from_inputs(
            "mag", "l1a", "burst", "20241301", "v001", None,
        )
        .unwrap_err();
        assert!(err.violations().iter().any(|v| v.contains("start date")));
    }
}
