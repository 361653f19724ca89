//! Data product versions (`vNNN`) and repointing identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Product version, written as `v` followed by exactly three digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version(u16);

impl Version {
    pub const MAX: u16 = 999;

    pub fn new(number: u16) -> Option<Self> {
        (number <= Self::MAX).then_some(Self(number))
    }

    pub fn number(&self) -> u16 {
        self.0
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('v')
            .filter(|d| d.len() == 3 && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| ParseError::InvalidVersion(s.to_string()))?;

        digits
            .parse::<u16>()
            .map(Version)
            .map_err(|_| ParseError::InvalidVersion(s.to_string()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{:03}", self.0)
    }
}

/// Version selector used when querying the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFilter {
    /// Only the highest version present in the results.
    Latest,
    Exact(Version),
}

impl FromStr for VersionFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "latest" {
            Ok(VersionFilter::Latest)
        } else {
            s.parse().map(VersionFilter::Exact)
        }
    }
}

impl fmt::Display for VersionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionFilter::Latest => f.write_str("latest"),
            VersionFilter::Exact(version) => write!(f, "{version}"),
        }
    }
}

/// `latest` or `vNNN`.
pub fn is_valid_version(input: &str) -> bool {
    input.parse::<VersionFilter>().is_ok()
}

/// `repoint` followed by exactly five digits.
pub fn is_valid_repointing(input: &str) -> bool {
    input
        .strip_prefix("repoint")
        .is_some_and(|d| d.len() == 5 && d.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!("v000".parse::<Version>().unwrap().number(), 0);
        assert_eq!("v999".parse::<Version>().unwrap().number(), 999);
        assert_eq!("v042".parse::<Version>().unwrap().to_string(), "v042");
    }

    #[test]
    fn test_version_validity() {
        assert!(is_valid_version("latest"));
        assert!(is_valid_version("v000"));
        assert!(is_valid_version("v999"));
        assert!(!is_valid_version("v12"));
        assert!(!is_valid_version("1v23"));
        assert!(!is_valid_version("v1234"));
        assert!(!is_valid_version("V001"));
        assert!(!is_valid_version("v+12"));
    }

    #[test]
    fn test_version_ordering() {
        let v1: Version = "v001".parse().unwrap();
        let v3: Version = "v003".parse().unwrap();
        assert!(v3 > v1);
        assert_eq!(Version::new(1000), None);
    }

    #[test]
    fn test_repointing_validity() {
        assert!(is_valid_repointing("repoint00012"));
        assert!(!is_valid_repointing("repoint0012"));
        assert!(!is_valid_repointing("repointing00012"));
        assert!(!is_valid_repointing("00012"));
    }
}
