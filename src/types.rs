//! Shared values that flow through the sort pipeline.
//!
//! Nothing here is persisted. A [`Coordinate`] comes out of the EXIF reader,
//! a [`Place`] comes out of the geocoder, and an [`ImageFile`] is what the
//! scanner hands to the driver.

use serde::Serialize;
use std::path::PathBuf;

/// Sentinel used for any administrative field the geocoder could not fill.
pub const UNKNOWN: &str = "Unknown";

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The four-level administrative address used to build a destination path.
///
/// Every field is always present. Fields the geocoder did not report hold
/// [`UNKNOWN`], never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    pub country: String,
    pub state: String,
    pub state_district: String,
    pub county: String,
}

impl Place {
    /// A place with every field set to [`UNKNOWN`].
    pub fn unknown() -> Self {
        Self {
            country: UNKNOWN.to_string(),
            state: UNKNOWN.to_string(),
            state_district: UNKNOWN.to_string(),
            county: UNKNOWN.to_string(),
        }
    }

    /// Fields in path order: country, state, state district, county.
    pub fn levels(&self) -> [&str; 4] {
        [
            &self.country,
            &self.state,
            &self.state_district,
            &self.county,
        ]
    }

    /// Human-readable `country/state/state_district/county`, unsanitized.
    pub fn display_path(&self) -> String {
        self.levels().join("/")
    }
}

/// A candidate image found in the input directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    /// Full path to the file (input directory joined with the name).
    pub path: PathBuf,
    /// Base filename, preserved exactly when the file is moved.
    pub file_name: String,
}
