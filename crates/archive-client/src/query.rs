//! Catalog query parameters, client-side validation and the `latest` filter.

use std::collections::BTreeMap;

use file_validation::ScienceFilePath;
use imap_common::{
    format_date, is_valid_date, is_valid_repointing, DataLevel, Instrument, Version, VersionFilter,
    VALID_FILE_EXTENSIONS,
};
use serde_json::Value;

use crate::error::{ArchiveError, Result};

/// One catalog entry as returned by the query endpoint, keyed by field name.
pub type QueryRecord = BTreeMap<String, String>;

/// Filters for a catalog query. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub instrument: Option<String>,
    pub data_level: Option<String>,
    pub descriptor: Option<String>,
    /// Files starting on or after this date (`YYYYMMDD`)
    pub start_date: Option<String>,
    /// Files starting before this date (`YYYYMMDD`)
    pub end_date: Option<String>,
    pub repointing: Option<String>,
    /// `vNNN` or `latest`
    pub version: Option<String>,
    pub extension: Option<String>,
}

impl QueryParams {
    /// Filters that select exactly the given science file.
    pub fn for_science_file(file: &ScienceFilePath) -> Self {
        Self {
            instrument: Some(file.instrument().to_string()),
            data_level: Some(file.data_level().to_string()),
            descriptor: Some(file.descriptor().to_string()),
            start_date: Some(format_date(&file.start_date())),
            end_date: None,
            repointing: file.repointing().map(|r| format!("repoint{r:05}")),
            version: Some(file.version().to_string()),
            extension: Some(file.extension().to_string()),
        }
    }

    /// Whether results should be reduced to the highest version found.
    pub fn wants_latest(&self) -> bool {
        self.version.as_deref() == Some("latest")
    }

    fn fields(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("instrument", self.instrument.as_deref()),
            ("data_level", self.data_level.as_deref()),
            ("descriptor", self.descriptor.as_deref()),
            ("start_date", self.start_date.as_deref()),
            ("end_date", self.end_date.as_deref()),
            ("repointing", self.repointing.as_deref()),
            ("version", self.version.as_deref()),
            ("extension", self.extension.as_deref()),
        ]
    }

    /// Check every filter without touching the network.
    pub fn validate(&self) -> Result<()> {
        self.request_params().map(|_| ())
    }

    /// Validated filters to send, in a fixed order. A `latest` version is
    /// applied locally and therefore left out.
    pub fn request_params(&self) -> Result<Vec<(&'static str, String)>> {
        let params: Vec<(&'static str, String)> = self
            .fields()
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
            .filter(|(key, value)| !(*key == "version" && value == "latest"))
            .collect();

        if params.is_empty() {
            let message = if self.wants_latest() {
                "One other parameter must be run with 'version'".to_string()
            } else {
                "At least one query parameter must be provided. \
                 Run 'query -h' for more information."
                    .to_string()
            };
            return Err(ArchiveError::InvalidQuery(message));
        }

        if let Some(instrument) = &self.instrument {
            if instrument.parse::<Instrument>().is_err() {
                return Err(ArchiveError::InvalidQuery(format!(
                    "Not a valid instrument, please choose from {}",
                    Instrument::names().join(", ")
                )));
            }
        }

        if let Some(level) = &self.data_level {
            if level.parse::<DataLevel>().is_err() {
                return Err(ArchiveError::InvalidQuery(format!(
                    "Not a valid data level, choose from {}",
                    DataLevel::names().join(", ")
                )));
            }
        }

        if self.start_date.as_deref().is_some_and(|d| !is_valid_date(d)) {
            return Err(ArchiveError::InvalidQuery(
                "Not a valid start date, use format 'YYYYMMDD'.".to_string(),
            ));
        }

        if self.end_date.as_deref().is_some_and(|d| !is_valid_date(d)) {
            return Err(ArchiveError::InvalidQuery(
                "Not a valid end date, use format 'YYYYMMDD'.".to_string(),
            ));
        }

        if let Some(version) = &self.version {
            if version.parse::<VersionFilter>().is_err() {
                return Err(ArchiveError::InvalidQuery(
                    "Not a valid version, use format 'vXXX'.".to_string(),
                ));
            }
        }

        if self.repointing.as_deref().is_some_and(|r| !is_valid_repointing(r)) {
            return Err(ArchiveError::InvalidQuery(
                "Not a valid repointing, use format repoint<num>, \
                 where <num> is a 5 digit integer."
                    .to_string(),
            ));
        }

        if let Some(extension) = &self.extension {
            if !VALID_FILE_EXTENSIONS.contains(&extension.as_str()) {
                return Err(ArchiveError::InvalidQuery(format!(
                    "Not a valid extension, choose from ({}).",
                    VALID_FILE_EXTENSIONS.join(", ")
                )));
            }
        }

        Ok(params)
    }
}

/// Keep only the records carrying the highest version present.
///
/// Records whose version does not parse never match.
pub fn filter_latest(records: Vec<QueryRecord>) -> Vec<QueryRecord> {
    let version_of = |record: &QueryRecord| {
        record
            .get("version")
            .and_then(|v| v.parse::<Version>().ok())
    };

    let Some(max_version) = records.iter().filter_map(version_of).max() else {
        return Vec::new();
    };

    records
        .into_iter()
        .filter(|record| version_of(record) == Some(max_version))
        .collect()
}

/// Flatten a JSON object into string fields. Strings are kept verbatim, null
/// becomes empty and anything else keeps its JSON text.
pub(crate) fn record_from_json(object: serde_json::Map<String, Value>) -> QueryRecord {
    object
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}
