//! Data module for locating the NEO source datasets
//!
//! This module provides the configuration object naming where the catalog
//! and close-approach files live.

mod config;

pub use config::{
    DataConfig, APPROACH_FILE_NAME, APPROACH_PATH_ENV, CATALOG_FILE_NAME, CATALOG_PATH_ENV,
    DATA_DIR_ENV, DEFAULT_DATA_DIR,
};
