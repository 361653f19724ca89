//! Calendar date handling for `YYYYMMDD` filename fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const DATE_FORMAT: &str = "%Y%m%d";

/// Parse an 8-digit `YYYYMMDD` string into a real calendar date.
///
/// Rejects anything that is not exactly eight ASCII digits, and digit strings
/// that name a day that does not exist (`20240230`).
pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    if input.len() != 8 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidDate(input.to_string()));
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(input.to_string()))
}

pub fn is_valid_date(input: &str) -> bool {
    parse_date(input).is_ok()
}

/// Format a date back into its `YYYYMMDD` filename form.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &DateRange) -> DateRange {
        DateRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date >= &self.start && date <= &self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("20240312").unwrap(), ymd(2024, 3, 12));
        assert_eq!(parse_date("20240229").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_parse_date_rejects_impossible_days() {
        assert!(parse_date("20240230").is_err());
        assert!(parse_date("20230229").is_err());
        assert!(parse_date("20241301").is_err());
    }

    #[test]
    fn test_parse_date_rejects_bad_shape() {
        assert!(parse_date("2024031").is_err());
        assert!(parse_date("202403120").is_err());
        assert!(parse_date("2024-03-12").is_err());
        assert!(parse_date("+2024031").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&ymd(2025, 1, 4)), "20250104");
    }

    #[test]
    fn test_range_union() {
        let a = DateRange::new(ymd(2025, 1, 1), ymd(2025, 1, 1));
        let b = DateRange::new(ymd(2025, 1, 3), ymd(2025, 1, 4));
        let merged = a.union(&b);
        assert_eq!(merged.start, ymd(2025, 1, 1));
        assert_eq!(merged.end, ymd(2025, 1, 4));
        assert!(merged.contains(&ymd(2025, 1, 2)));
        assert!(!merged.contains(&ymd(2025, 1, 5)));
    }
}
