//! NEO catalogs module
//!
//! This module provides the two loaders: the near-Earth object catalog (CSV)
//! and the close-approach dataset (JSON). Both read the whole source into
//! memory, accept gzip-compressed files, and return records in file order.
//!
//! The plain loaders are all-or-nothing. The `*_lenient` variants keep going
//! past bad rows and report them in an [`Ingested`] result instead.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::{io_err, Result};

pub mod approach;
pub mod neo;

pub use approach::{load_approaches, load_approaches_lenient};
pub use neo::{load_neos, load_neos_lenient};

/// A data row that could not be converted during a lenient load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Zero-based data row index (the header is not counted)
    pub row: usize,
    pub message: String,
}

/// Records that converted cleanly plus the rows that did not
#[derive(Debug, Clone)]
pub struct Ingested<T> {
    pub records: Vec<T>,
    pub failures: Vec<RowError>,
}

impl<T> Ingested<T> {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// True when every source row produced a record
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of data rows seen in the source
    pub fn rows_read(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    fn push_result(&mut self, row: usize, result: Result<T>) {
        match result {
            Ok(record) => self.records.push(record),
            Err(e) => {
                log::warn!("Skipping row {}: {}", row, e);
                self.failures.push(RowError {
                    row,
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Read a source file fully into memory, decompressing `.gz` files
pub(crate) fn read_source(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| io_err(path, e))?;

    let is_gzipped = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let mut reader: Box<dyn Read> = if is_gzipped {
        log::debug!("Reading gzipped file: {}", path.display());
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        log::debug!("Reading file: {}", path.display());
        Box::new(BufReader::new(file))
    };

    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .map_err(|e| io_err(path, e))?;
    Ok(buffer)
}
