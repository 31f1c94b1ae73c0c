//! Close-approach data loader
//!
//! Reads the close-approach JSON document: an object with a `fields` array
//! naming the columns and a `data` array of rows. Column positions are
//! looked up in `fields` when the file is loaded, so a reordered schema is
//! still read correctly and a renamed one fails with a schema error.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::{read_source, Ingested};
use crate::models::CloseApproach;
use crate::NeoError;
use crate::Result;

/// Field holding the object designation
pub const DESIGNATION_FIELD: &str = "des";
/// Field holding the approach time
pub const TIME_FIELD: &str = "cd";
/// Field holding the nominal approach distance (au)
pub const DISTANCE_FIELD: &str = "dist";
/// Field holding the relative velocity (km/s)
pub const VELOCITY_FIELD: &str = "v_rel";

/// Top level of the close-approach document
#[derive(Debug, Deserialize)]
struct CadDocument {
    fields: Vec<String>,
    data: Vec<Vec<Value>>,
}

/// Positions of the used fields within each data row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Offsets {
    designation: usize,
    time: usize,
    distance: usize,
    velocity: usize,
}

impl Offsets {
    fn resolve(fields: &[String]) -> Result<Self> {
        let find_field = |name: &str| -> Result<usize> {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| NeoError::Schema(format!("Missing field: {}", name)))
        };

        Ok(Self {
            designation: find_field(DESIGNATION_FIELD)?,
            time: find_field(TIME_FIELD)?,
            distance: find_field(DISTANCE_FIELD)?,
            velocity: find_field(VELOCITY_FIELD)?,
        })
    }
}

/// Parse the document and resolve field offsets from its header
fn read_document(path: &Path) -> Result<(Vec<Vec<Value>>, Offsets)> {
    let contents = read_source(path)?;
    let document: CadDocument = serde_json::from_slice(&contents).map_err(|e| {
        NeoError::Structure(format!(
            "Failed to parse close-approach data {}: {}",
            path.display(),
            e
        ))
    })?;

    let offsets = Offsets::resolve(&document.fields)?;
    Ok((document.data, offsets))
}

fn token<'a>(row: usize, values: &'a [Value], idx: usize, field: &str) -> Result<&'a Value> {
    values.get(idx).ok_or_else(|| {
        NeoError::Structure(format!(
            "Row {} has {} values, no {} at offset {}",
            row,
            values.len(),
            field,
            idx
        ))
    })
}

/// Render a scalar token as text; numbers keep their JSON spelling
fn token_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert a numeric token, treating falsy tokens as unknown
///
/// `null`, `false`, `""` and a numeric zero are unknown. Any other string,
/// including one made only of whitespace, is parsed as a float. `true`, arrays
/// and objects are coercion errors rather than being read as numbers.
fn token_to_f64(row: usize, value: &Value, field: &str) -> Result<Option<f64>> {
    let coercion = || NeoError::Coercion {
        row,
        field: field.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => s.trim().parse::<f64>().map(Some).map_err(|_| coercion()),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => Ok(None),
            Some(v) => Ok(Some(v)),
            None => Err(coercion()),
        },
        _ => Err(coercion()),
    }
}

/// Convert one data row into a `CloseApproach`
fn parse_row(row: usize, values: &[Value], offsets: &Offsets) -> Result<CloseApproach> {
    let designation = token_to_string(token(row, values, offsets.designation, DESIGNATION_FIELD)?)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| NeoError::Schema(format!("Row {}: missing designation", row)))?;

    let time = token_to_string(token(row, values, offsets.time, TIME_FIELD)?)
        .ok_or_else(|| NeoError::Schema(format!("Row {}: missing approach time", row)))?;

    let distance = token_to_f64(
        row,
        token(row, values, offsets.distance, DISTANCE_FIELD)?,
        DISTANCE_FIELD,
    )?;
    let velocity = token_to_f64(
        row,
        token(row, values, offsets.velocity, VELOCITY_FIELD)?,
        VELOCITY_FIELD,
    )?;

    Ok(CloseApproach::new(designation, time, distance, velocity))
}

/// Load close approaches from a JSON (or gzipped JSON) file
///
/// Invalid JSON, a missing `fields`/`data` key or field name, a short row or
/// an unparseable number fails the whole load.
pub fn load_approaches<P: AsRef<Path>>(path: P) -> Result<Vec<CloseApproach>> {
    let path = path.as_ref();
    let (data, offsets) = read_document(path)?;

    let approaches = data
        .iter()
        .enumerate()
        .map(|(row, values)| parse_row(row, values, &offsets))
        .collect::<Result<Vec<_>>>()?;

    log::info!(
        "Loaded {} close approaches from {}",
        approaches.len(),
        path.display()
    );
    Ok(approaches)
}

/// Load close approaches, collecting bad rows instead of failing on them
///
/// I/O errors, malformed JSON and missing fields are still fatal.
pub fn load_approaches_lenient<P: AsRef<Path>>(path: P) -> Result<Ingested<CloseApproach>> {
    let path = path.as_ref();
    let (data, offsets) = read_document(path)?;

    let mut ingested = Ingested::new();
    for (row, values) in data.iter().enumerate() {
        ingested.push_result(row, parse_row(row, values, &offsets));
    }

    log::info!(
        "Loaded {} close approaches from {} ({} rows skipped)",
        ingested.records.len(),
        path.display(),
        ingested.failures.len()
    );
    Ok(ingested)
}
