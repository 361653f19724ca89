//! Mission-wide naming constants: instruments, data levels and extensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Mission literal that prefixes every science and ancillary filename.
pub const MISSION: &str = "imap";

/// Extensions a science file may carry.
pub const VALID_FILE_EXTENSIONS: &[&str] = &["pkts", "cdf"];

/// Extensions the ancillary validator accepts.
///
/// The ancillary filename pattern also matches `csv` and `json`, but only `cdf`
/// passes validation.
pub const VALID_ANCILLARY_FILE_EXTENSIONS: &[&str] = &["cdf"];

/// Science filename convention, used in error messages.
pub const FILENAME_CONVENTION: &str =
    "<mission>_<instrument>_<datalevel>_<descriptor>_<startdate>(-<repointing>)_<version>.<extension>";

/// Ancillary filename convention, used in error messages.
pub const ANCILLARY_FILENAME_CONVENTION: &str =
    "<mission>_<instrument>_<descriptor>_<startdate>(-<enddate>)_<version>.<extension>";

/// Instrument subsystems flying on the spacecraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Codice,
    Glows,
    Hi,
    Hit,
    Idex,
    Lo,
    Mag,
    Swapi,
    Swe,
    Ultra,
}

impl Instrument {
    pub const ALL: [Instrument; 10] = [
        Instrument::Codice,
        Instrument::Glows,
        Instrument::Hi,
        Instrument::Hit,
        Instrument::Idex,
        Instrument::Lo,
        Instrument::Mag,
        Instrument::Swapi,
        Instrument::Swe,
        Instrument::Ultra,
    ];

    /// Name as it appears in filenames and archive paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Codice => "codice",
            Instrument::Glows => "glows",
            Instrument::Hi => "hi",
            Instrument::Hit => "hit",
            Instrument::Idex => "idex",
            Instrument::Lo => "lo",
            Instrument::Mag => "mag",
            Instrument::Swapi => "swapi",
            Instrument::Swe => "swe",
            Instrument::Ultra => "ultra",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Instrument::as_str).collect()
    }
}

impl FromStr for Instrument {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|instrument| instrument.as_str() == s)
            .ok_or_else(|| ParseError::UnknownInstrument(s.to_string()))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing stage of a science product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataLevel {
    L0,
    L1,
    L1a,
    L1b,
    L1c,
    L1ca,
    L1cb,
    L1d,
    L2,
    L2pre,
    L3,
    L3a,
    L3b,
    L3c,
    L3d,
}

impl DataLevel {
    pub const ALL: [DataLevel; 15] = [
        DataLevel::L0,
        DataLevel::L1,
        DataLevel::L1a,
        DataLevel::L1b,
        DataLevel::L1c,
        DataLevel::L1ca,
        DataLevel::L1cb,
        DataLevel::L1d,
        DataLevel::L2,
        DataLevel::L2pre,
        DataLevel::L3,
        DataLevel::L3a,
        DataLevel::L3b,
        DataLevel::L3c,
        DataLevel::L3d,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataLevel::L0 => "l0",
            DataLevel::L1 => "l1",
            DataLevel::L1a => "l1a",
            DataLevel::L1b => "l1b",
            DataLevel::L1c => "l1c",
            DataLevel::L1ca => "l1ca",
            DataLevel::L1cb => "l1cb",
            DataLevel::L1d => "l1d",
            DataLevel::L2 => "l2",
            DataLevel::L2pre => "l2pre",
            DataLevel::L3 => "l3",
            DataLevel::L3a => "l3a",
            DataLevel::L3b => "l3b",
            DataLevel::L3c => "l3c",
            DataLevel::L3d => "l3d",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(DataLevel::as_str).collect()
    }

    /// Raw telemetry level. Raw files are packet dumps, everything above is CDF.
    pub fn is_raw(&self) -> bool {
        matches!(self, DataLevel::L0)
    }

    /// The only extension a file at this level may carry.
    pub fn expected_extension(&self) -> &'static str {
        if self.is_raw() {
            "pkts"
        } else {
            "cdf"
        }
    }
}

impl FromStr for DataLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseError::UnknownDataLevel(s.to_string()))
    }
}

impl fmt::Display for DataLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instrument() {
        assert_eq!("mag".parse::<Instrument>().unwrap(), Instrument::Mag);
        assert_eq!("ultra".parse::<Instrument>().unwrap(), Instrument::Ultra);
        assert!(matches!(
            "MAG".parse::<Instrument>(),
            Err(ParseError::UnknownInstrument(_))
        ));
    }

    #[test]
    fn test_instrument_round_trip() {
        for instrument in Instrument::ALL {
            assert_eq!(instrument.as_str().parse::<Instrument>().unwrap(), instrument);
        }
    }

    #[test]
    fn test_parse_data_level() {
        assert_eq!("l1a".parse::<DataLevel>().unwrap(), DataLevel::L1a);
        assert_eq!("l2pre".parse::<DataLevel>().unwrap(), DataLevel::L2pre);
        assert!("l4".parse::<DataLevel>().is_err());
    }

    #[test]
    fn test_expected_extension() {
        assert_eq!(DataLevel::L0.expected_extension(), "pkts");
        assert_eq!(DataLevel::L1b.expected_extension(), "cdf");
        assert_eq!(DataLevel::L3d.expected_extension(), "cdf");
    }

    #[test]
    fn test_unknown_instrument_message_lists_choices() {
        let err = "xyz".parse::<Instrument>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid instrument xyz"));
        assert!(message.contains("codice"));
        assert!(message.contains("ultra"));
    }
}
