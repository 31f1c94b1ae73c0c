//! End-to-end ingestion scenarios over small fixture files
//!
//! Each test writes a catalog and/or close-approach file to a temporary
//! directory and loads it through the public API.

use std::fs;
use std::path::Path;
use std::thread;

use approx::assert_relative_eq;
use neoloader::catalogs::{load_approaches, load_neos};
use neoloader::{DataConfig, ErrorKind, Loader, NeoError};
use tempfile::tempdir;

const CATALOG: &str = "\
id,spkid,full_name,pdes,name,prefix,neo,pha,diameter,albedo
a0000433,2000433,433 Eros (A898 PA),433,Eros,,Y,Y,16.84,0.25
a2000433,2000433,(2000433),2000433,,,Y,N,,
a0001036,2001036,1036 Ganymed (A924 UB),1036,Ganymed,,Y,y,37.675,0.238
";

const CAD: &str = r#"{
  "signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.1"},
  "count": "3",
  "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
  "data": [
    ["2000433", "28", "2415020.507669610", "1900-Jan-01 00:00", "0.0924", "0.0922", "0.0925", "5.3", "5.29", "< 00:01", "10.4"],
    [2000433, "28", "2415021.5", "1900-Jan-02 00:00", "", "0.0922", "0.0925", "5.3", "5.29", "< 00:01", "10.4"],
    ["1036", "15", "2415022.5", "1900-Jan-03 00:00", "0.3", "0.29", "0.31", null, null, "00:02", "9.2"]
  ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn catalog_rows_map_to_records() {
    let dir = tempdir().unwrap();
    write(dir.path(), "neos.csv", CATALOG);

    let neos = load_neos(dir.path().join("neos.csv")).unwrap();
    assert_eq!(neos.len(), 3);

    // Named hazardous object
    let eros = &neos[0];
    assert_eq!(eros.designation(), "433");
    assert_eq!(eros.name(), Some("Eros"));
    assert_relative_eq!(eros.diameter().unwrap(), 16.84);
    assert!(eros.hazardous());

    // Unnamed object with unknown diameter
    let unnamed = &neos[1];
    assert_eq!(unnamed.designation(), "2000433");
    assert_eq!(unnamed.name(), None);
    assert!(unnamed.diameter_or_nan().is_nan());
    assert!(!unnamed.hazardous());

    // Lowercase marker is not hazardous
    assert!(!neos[2].hazardous());
}

#[test]
fn approach_rows_map_to_records() {
    let dir = tempdir().unwrap();
    write(dir.path(), "cad.json", CAD);

    let approaches = load_approaches(dir.path().join("cad.json")).unwrap();
    assert_eq!(approaches.len(), 3);

    let first = &approaches[0];
    assert_eq!(first.designation(), "2000433");
    assert_eq!(first.time(), "1900-Jan-01 00:00");
    assert_relative_eq!(first.distance().unwrap(), 0.0924);
    assert_relative_eq!(first.velocity().unwrap(), 5.3);

    // Bare integer designation and empty distance
    let second = &approaches[1];
    assert_eq!(second.designation(), "2000433");
    assert!(second.distance_or_nan().is_nan());
    assert_relative_eq!(second.velocity().unwrap(), 5.3);

    // Null velocity
    assert!(approaches[2].velocity_or_nan().is_nan());
}

#[test]
fn non_numeric_diameter_aborts_load() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "neos.csv",
        "pdes,name,diameter,pha\n433,Eros,16.84,Y\n719,Albert,abc,N\n",
    );

    let err = load_neos(dir.path().join("neos.csv")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Coercion);
}

#[test]
fn approach_file_without_data_key() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "cad.json",
        r#"{"fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel"]}"#,
    );

    let err = load_approaches(dir.path().join("cad.json")).unwrap_err();
    assert!(matches!(err, NeoError::Structure(_)));
}

#[test]
fn missing_files_are_io_errors() {
    let dir = tempdir().unwrap();

    let neos = load_neos(dir.path().join("neos.csv"));
    assert_eq!(neos.unwrap_err().kind(), ErrorKind::Io);

    let approaches = load_approaches(dir.path().join("cad.json"));
    assert_eq!(approaches.unwrap_err().kind(), ErrorKind::Io);
}

#[test]
fn loads_join_on_designation() {
    let dir = tempdir().unwrap();
    write(dir.path(), "neos.csv", CATALOG);
    write(dir.path(), "cad.json", CAD);

    let dataset = Loader::with_config(DataConfig::with_data_dir(dir.path()))
        .load_all()
        .unwrap();

    let ganymed_approaches = dataset
        .approaches
        .iter()
        .filter(|ca| ca.designation() == "1036")
        .count();
    assert!(dataset.neos.iter().any(|neo| neo.designation() == "1036"));
    assert_eq!(ganymed_approaches, 1);
}

#[test]
fn loads_run_independently_on_threads() {
    let dir = tempdir().unwrap();
    write(dir.path(), "neos.csv", CATALOG);
    write(dir.path(), "cad.json", CAD);

    let catalog_path = dir.path().join("neos.csv");
    let approach_path = dir.path().join("cad.json");

    let neos = thread::spawn(move || load_neos(catalog_path));
    let approaches = thread::spawn(move || load_approaches(approach_path));

    assert_eq!(neos.join().unwrap().unwrap().len(), 3);
    assert_eq!(approaches.join().unwrap().unwrap().len(), 3);
}
