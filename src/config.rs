//! Runtime settings: where the library file lives and which years are accepted.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    book::DEFAULT_MIN_YEAR,
    error::{LibraryError, Result},
};

/// Default name of the library file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "library.json";

/// Settings for a library session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// The JSON file holding the records
    pub data_file: PathBuf,
    /// Earliest publication year accepted for new books
    pub min_year: i64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self { data_file: PathBuf::from(DEFAULT_DATA_FILE), min_year: DEFAULT_MIN_YEAR }
    }
}

impl LibraryConfig {
    /// Parse settings from TOML text; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if `text` is not valid TOML for these settings.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| LibraryError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Config` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| LibraryError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&text, path)?;
        debug!(path = %path.display(), data_file = %config.data_file.display(), "config loaded");
        Ok(config)
    }

    /// Settings from `path` when given, defaults otherwise
    ///
    /// # Errors
    ///
    /// See [`LibraryConfig::from_file`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Replace the data file location
    #[must_use]
    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self
    }
}
