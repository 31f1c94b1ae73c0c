//! neoloader: ingestion of near-Earth object catalogs and close-approach data
//!
//! This crate reads the NEO catalog (CSV) and the close-approach dataset (JSON)
//! and turns every source row into a typed record, preserving file order.

use std::path::PathBuf;
use thiserror::Error;

pub mod catalogs;
pub mod data;
pub mod models;

// Re-export commonly used types
pub use catalogs::{Ingested, RowError};
pub use data::DataConfig;
pub use models::{CloseApproach, NearEarthObject};

/// Main error type for the neoloader library
#[derive(Debug, Error)]
pub enum NeoError {
    /// The source file is missing or could not be read
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// The path of the file that caused the error
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    #[error("Invalid structure: {0}")]
    Structure(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A numeric field held text that does not parse as a number
    #[error("Row {row}: cannot convert {field} value {value:?} to a number")]
    Coercion {
        /// Zero-based data row index
        row: usize,
        /// Source field name
        field: String,
        /// The offending raw value
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`NeoError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File missing or unreadable
    Io,
    /// Malformed syntax, missing keys or columns
    Structure,
    /// A value that should be numeric is not
    Coercion,
    /// Configuration could not be applied
    Config,
}

impl NeoError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            NeoError::Io { .. } => ErrorKind::Io,
            NeoError::Structure(_) | NeoError::Schema(_) | NeoError::Csv(_) => {
                ErrorKind::Structure
            }
            NeoError::Coercion { .. } => ErrorKind::Coercion,
            NeoError::Config(_) => ErrorKind::Config,
        }
    }
}

/// Helper function to convert a std::io::Error to NeoError
pub fn io_err(path: impl Into<PathBuf>, err: std::io::Error) -> NeoError {
    NeoError::Io {
        path: path.into(),
        source: err,
    }
}

/// Result type for neoloader operations
pub type Result<T> = std::result::Result<T, NeoError>;

/// Both collections produced by a full load
#[derive(Debug, Clone)]
pub struct Dataset {
    pub neos: Vec<NearEarthObject>,
    pub approaches: Vec<CloseApproach>,
}

/// Entry point for loading the NEO datasets
pub struct Loader {
    config: DataConfig,
}

impl Loader {
    /// Create a new loader with the default data paths
    pub fn new() -> Self {
        Self {
            config: DataConfig::default(),
        }
    }

    /// Create a loader from an explicit configuration
    pub fn with_config(config: DataConfig) -> Self {
        Self { config }
    }

    /// The configuration this loader reads from
    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Load the NEO catalog from the configured path
    pub fn load_neos(&self) -> Result<Vec<NearEarthObject>> {
        catalogs::load_neos(&self.config.catalog_path)
    }

    /// Load the close approaches from the configured path
    pub fn load_approaches(&self) -> Result<Vec<CloseApproach>> {
        catalogs::load_approaches(&self.config.approach_path)
    }

    /// Load both datasets; either failure aborts the whole call
    pub fn load_all(&self) -> Result<Dataset> {
        let neos = self.load_neos()?;
        let approaches = self.load_approaches()?;
        Ok(Dataset { neos, approaches })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
