//! GPS position extraction from embedded EXIF metadata.
//!
//! Reads the EXIF block with `kamadak-exif` (JPEG APP1, PNG `eXIf`, TIFF) and
//! converts the `GPSLatitude`/`GPSLongitude` degree-minute-second rationals to
//! signed decimal degrees using the matching `*Ref` hemisphere tags.
//!
//! Callers treat every failure the same way ("skip this image"), but the
//! error still says which step failed so it can be logged.

use crate::types::Coordinate;
use exif::{Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GpsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),
    #[error("EXIF data has no GPS position")]
    MissingGps,
}

/// Read the GPS position of an image file.
///
/// The file is opened, decoded and closed before this returns, on success
/// and on every error path.
pub fn read_coordinate(path: &Path) -> Result<Coordinate, GpsError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader)?;
    coordinate_from_exif(&exif).ok_or(GpsError::MissingGps)
}

/// Latitude and longitude from already-decoded EXIF, if both are complete.
pub fn coordinate_from_exif(exif: &Exif) -> Option<Coordinate> {
    let latitude = signed_degrees(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S')?;
    let longitude = signed_degrees(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W')?;
    Some(Coordinate::new(latitude, longitude))
}

/// Decimal degrees for one axis, negated when the reference tag names the
/// `negative` hemisphere.
fn signed_degrees(exif: &Exif, value_tag: Tag, ref_tag: Tag, negative: u8) -> Option<f64> {
    let degrees = dms_to_degrees(&exif.get_field(value_tag, In::PRIMARY)?.value)?;
    let hemisphere = match &exif.get_field(ref_tag, In::PRIMARY)?.value {
        Value::Ascii(parts) => parts.first().and_then(|p| p.first()).copied()?,
        _ => return None,
    };
    if hemisphere.eq_ignore_ascii_case(&negative) {
        Some(-degrees)
    } else {
        Some(degrees)
    }
}

fn dms_to_degrees(value: &Value) -> Option<f64> {
    match value {
        Value::Rational(parts) if parts.len() >= 3 => {
            let degrees =
                parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0;
            degrees.is_finite().then_some(degrees)
        }
        _ => None,
    }
}
