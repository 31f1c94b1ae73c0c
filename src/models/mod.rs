//! Record types produced by the loaders
//!
//! Both records are built once per source row and are read-only afterwards.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Format of close-approach times, e.g. `1900-Jan-01 00:00`
pub const APPROACH_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// An entry of the near-Earth object catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearEarthObject {
    designation: String,
    name: Option<String>,
    /// Diameter in kilometers
    diameter: Option<f64>,
    hazardous: bool,
}

impl NearEarthObject {
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: Option<f64>,
        hazardous: bool,
    ) -> Self {
        Self {
            designation: designation.into(),
            name,
            diameter,
            hazardous,
        }
    }

    /// Primary designation, the join key against close approaches
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// IAU name, if the object has one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Diameter in kilometers, `None` when unknown
    pub fn diameter(&self) -> Option<f64> {
        self.diameter
    }

    /// Diameter with NaN standing in for "unknown"
    pub fn diameter_or_nan(&self) -> f64 {
        self.diameter.unwrap_or(f64::NAN)
    }

    /// Whether the object is flagged potentially hazardous
    pub fn hazardous(&self) -> bool {
        self.hazardous
    }
}

/// A single close approach of an object to Earth
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloseApproach {
    designation: String,
    time: String,
    /// Nominal approach distance in astronomical units
    distance: Option<f64>,
    /// Relative velocity in km/s
    velocity: Option<f64>,
}

impl CloseApproach {
    pub fn new(
        designation: impl Into<String>,
        time: impl Into<String>,
        distance: Option<f64>,
        velocity: Option<f64>,
    ) -> Self {
        Self {
            designation: designation.into(),
            time: time.into(),
            distance,
            velocity,
        }
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Approach time exactly as it appeared in the source
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Approach time parsed as a calendar date (TDB), if it is well formed
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.time, APPROACH_TIME_FORMAT).ok()
    }

    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    pub fn distance_or_nan(&self) -> f64 {
        self.distance.unwrap_or(f64::NAN)
    }

    pub fn velocity(&self) -> Option<f64> {
        self.velocity
    }

    pub fn velocity_or_nan(&self) -> f64 {
        self.velocity.unwrap_or(f64::NAN)
    }
}
