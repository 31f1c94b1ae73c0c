//! Near-Earth object catalog loader
//!
//! Reads the header-keyed NEO catalog CSV. Only the `pdes`, `name`,
//! `diameter` and `pha` columns are used; any other column is ignored.

use std::path::Path;

use csv::StringRecord;

use super::{read_source, Ingested};
use crate::models::NearEarthObject;
use crate::NeoError;
use crate::Result;

/// Column holding the primary designation
pub const DESIGNATION_COLUMN: &str = "pdes";
/// Column holding the IAU name
pub const NAME_COLUMN: &str = "name";
/// Column holding the diameter in kilometers
pub const DIAMETER_COLUMN: &str = "diameter";
/// Column holding the potentially-hazardous flag
pub const HAZARD_COLUMN: &str = "pha";

/// Value of the hazard column that marks an object as hazardous
pub const HAZARD_MARKER: &str = "Y";

/// Positions of the used columns within each record
#[derive(Debug, Clone, Copy)]
struct Columns {
    designation: usize,
    name: usize,
    diameter: usize,
    hazard: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find_column = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| NeoError::Schema(format!("Missing column: {}", name)))
        };

        Ok(Self {
            designation: find_column(DESIGNATION_COLUMN)?,
            name: find_column(NAME_COLUMN)?,
            diameter: find_column(DIAMETER_COLUMN)?,
            hazard: find_column(HAZARD_COLUMN)?,
        })
    }
}

/// Read the catalog header and resolve the column positions
fn open_reader(path: &Path) -> Result<(csv::Reader<std::io::Cursor<Vec<u8>>>, Columns)> {
    let contents = read_source(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(std::io::Cursor::new(contents));

    let columns = Columns::resolve(reader.headers()?)?;
    Ok((reader, columns))
}

/// Convert one catalog record into a `NearEarthObject`
fn parse_record(row: usize, record: &StringRecord, columns: &Columns) -> Result<NearEarthObject> {
    let field = move |idx: usize| record.get(idx).unwrap_or("");

    let designation = field(columns.designation);
    if designation.is_empty() {
        return Err(NeoError::Schema(format!(
            "Row {}: empty {} value",
            row, DESIGNATION_COLUMN
        )));
    }

    let name = match field(columns.name) {
        n if n.trim().is_empty() => None,
        n => Some(n.to_string()),
    };

    let raw_diameter = field(columns.diameter).trim();
    let diameter = if raw_diameter.is_empty() {
        None
    } else {
        let value = raw_diameter
            .parse::<f64>()
            .map_err(|_| NeoError::Coercion {
                row,
                field: DIAMETER_COLUMN.to_string(),
                value: raw_diameter.to_string(),
            })?;
        Some(value)
    };

    let hazardous = field(columns.hazard) == HAZARD_MARKER;

    Ok(NearEarthObject::new(designation, name, diameter, hazardous))
}

/// Load the NEO catalog from a CSV (or gzipped CSV) file
///
/// Any missing column, malformed record or unparseable diameter fails the
/// whole load; no partial catalog is returned. Rows with fewer cells than the
/// header are malformed and rejected with [`NeoError::Csv`].
pub fn load_neos<P: AsRef<Path>>(path: P) -> Result<Vec<NearEarthObject>> {
    let path = path.as_ref();
    let (mut reader, columns) = open_reader(path)?;

    let mut neos = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        neos.push(parse_record(row, &record, &columns)?);
    }

    log::info!(
        "Loaded {} near-Earth objects from {}",
        neos.len(),
        path.display()
    );
    Ok(neos)
}

/// Load the NEO catalog, collecting bad rows instead of failing on them
///
/// I/O errors and a missing column are still fatal.
pub fn load_neos_lenient<P: AsRef<Path>>(path: P) -> Result<Ingested<NearEarthObject>> {
    let path = path.as_ref();
    let (mut reader, columns) = open_reader(path)?;

    let mut ingested = Ingested::new();
    for (row, record) in reader.records().enumerate() {
        let result = record
            .map_err(NeoError::from)
            .and_then(|record| parse_record(row, &record, &columns));
        ingested.push_result(row, result);
    }

    log::info!(
        "Loaded {} near-Earth objects from {} ({} rows skipped)",
        ingested.records.len(),
        path.display(),
        ingested.failures.len()
    );
    Ok(ingested)
}
