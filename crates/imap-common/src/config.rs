//! Archive configuration: local data directory, API endpoint and credentials.
//!
//! Values come from the environment (`IMAP_DATA_DIR`, `IMAP_DATA_ACCESS_URL`,
//! `IMAP_API_KEY`) or from a YAML file, and are passed explicitly to the path
//! constructor and the transport client.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

pub const DATA_DIR_ENV: &str = "IMAP_DATA_DIR";
pub const DATA_ACCESS_URL_ENV: &str = "IMAP_DATA_ACCESS_URL";
pub const API_KEY_ENV: &str = "IMAP_API_KEY";

pub const DEFAULT_DATA_ACCESS_URL: &str = "https://api.dev.imap-mission.com";

/// Settings for locating files locally and reaching the archive API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchiveConfig {
    /// Root under which files are organised by instrument and level
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Base URL of the data access API
    #[serde(default = "default_data_access_url")]
    pub data_access_url: String,
    /// Key sent with uploads
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_data_access_url() -> String {
    DEFAULT_DATA_ACCESS_URL.to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            data_access_url: default_data_access_url(),
            api_key: None,
        }
    }
}

impl ArchiveConfig {
    /// Build a configuration from the process environment.
    ///
    /// An unset or empty `IMAP_DATA_DIR` falls back to `data/` under the
    /// current working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        Ok(Self::from_lookup(&cwd, |key| std::env::var(key).ok()))
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(cwd: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = Self {
            data_dir: get(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| cwd.join("data")),
            data_access_url: get(DATA_ACCESS_URL_ENV).unwrap_or_else(default_data_access_url),
            api_key: get(API_KEY_ENV),
        };

        debug!(
            data_dir = %config.data_dir.display(),
            url = %config.data_access_url,
            has_api_key = config.api_key.is_some(),
            "Resolved archive configuration"
        );
        config
    }

    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: ArchiveConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), "Loaded archive config");
        Ok(config)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.data_access_url.trim_end_matches('/')
    }
}
