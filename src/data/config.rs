//! Data file configuration
//!
//! Holds the locations of the NEO catalog and the close-approach file so that
//! loaders never bake paths into their signatures.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::NeoError;
use crate::Result;

/// Conventional data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";
/// Default NEO catalog file name
pub const CATALOG_FILE_NAME: &str = "neos.csv";
/// Default close-approach file name
pub const APPROACH_FILE_NAME: &str = "cad.json";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "NEO_DATA_DIR";
/// Environment variable overriding the catalog path
pub const CATALOG_PATH_ENV: &str = "NEO_CATALOG_PATH";
/// Environment variable overriding the approach path
pub const APPROACH_PATH_ENV: &str = "NEO_APPROACH_PATH";

/// Locations of the two source datasets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the NEO catalog CSV
    pub catalog_path: PathBuf,
    /// Path to the close-approach JSON
    pub approach_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::with_data_dir(DEFAULT_DATA_DIR)
    }
}

impl DataConfig {
    /// Both default file names under `dir`
    pub fn with_data_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            catalog_path: dir.join(CATALOG_FILE_NAME),
            approach_path: dir.join(APPROACH_FILE_NAME),
        }
    }

    /// Set a custom catalog path
    pub fn with_catalog_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalog_path = path.as_ref().to_path_buf();
        self
    }

    /// Set a custom close-approach path
    pub fn with_approach_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.approach_path = path.as_ref().to_path_buf();
        self
    }

    /// Build the configuration from environment variables
    ///
    /// `NEO_DATA_DIR` replaces the data directory, then `NEO_CATALOG_PATH` and
    /// `NEO_APPROACH_PATH` override the individual files.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::with_data_dir(dir),
            _ => Self::default(),
        };

        if let Some(path) = lookup(CATALOG_PATH_ENV).filter(|p| !p.is_empty()) {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(APPROACH_PATH_ENV).filter(|p| !p.is_empty()) {
            config.approach_path = PathBuf::from(path);
        }

        config
    }

    /// Read the configuration from a JSON file
    ///
    /// Keys missing from the file keep their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            NeoError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|e| {
            NeoError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        log::debug!(
            "Loaded data config from {}: catalog={}, approaches={}",
            path.display(),
            config.catalog_path.display(),
            config.approach_path.display()
        );
        Ok(config)
    }
}
