//! Shared test utilities for the geosort test suite.
//!
//! Fixture images are built in memory instead of being checked in: the
//! `image` crate encodes a tiny blank JPEG or PNG, and the helpers here
//! splice a hand-assembled little-endian TIFF/EXIF block into it (APP1 for
//! JPEG, `eXIf` for PNG).
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let images = tmp.path().join("images");
//! std::fs::create_dir(&images).unwrap();
//! let trip = write_gps_jpeg(&images, "trip.jpg", 37.7749, -122.4194);
//! std::fs::write(images.join("nogps.png"), png_bytes(Some(&plain_tiff()))).unwrap();
//! ```

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

// =========================================================================
// TIFF / EXIF assembly
// =========================================================================

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

const TAG_ORIENTATION: u16 = 0x0112;
const TAG_GPS_POINTER: u16 = 0x8825;
const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
const TAG_GPS_LATITUDE: u16 = 0x0002;
const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
const TAG_GPS_LONGITUDE: u16 = 0x0004;

fn push_u16(buf: &mut Vec<u8>, v: u16) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

fn push_entry(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
    push_u16(buf, tag);
    push_u16(buf, kind);
    push_u32(buf, count);
    buf.extend_from_slice(&value);
}

fn tiff_header(buf: &mut Vec<u8>) {
    buf.extend_from_slice(b"II");
    push_u16(buf, 42);
    push_u32(buf, 8);
}

/// Split absolute decimal degrees into degree/minute/second rationals.
/// Seconds keep four decimal places.
fn dms_rationals(value: f64) -> [(u32, u32); 3] {
    let abs = value.abs();
    let degrees = abs.floor();
    let minutes_f = (abs - degrees) * 60.0;
    let minutes = minutes_f.floor();
    let seconds = (minutes_f - minutes) * 60.0;
    [
        (degrees as u32, 1),
        (minutes as u32, 1),
        ((seconds * 10_000.0).round() as u32, 10_000),
    ]
}

/// A TIFF block whose IFD0 points to a GPS IFD holding latitude/longitude.
pub fn gps_tiff(latitude: f64, longitude: f64) -> Vec<u8> {
    // IFD0 at 8: count(2) + 1 entry(12) + next(4) -> GPS IFD at 26
    const GPS_IFD: u32 = 26;
    // GPS IFD: count(2) + 4 entries(48) + next(4) -> rational data at 80
    const DATA: u32 = GPS_IFD + 2 + 4 * 12 + 4;

    let lat_ref = if latitude < 0.0 { b'S' } else { b'N' };
    let lon_ref = if longitude < 0.0 { b'W' } else { b'E' };

    let mut buf = Vec::new();
    tiff_header(&mut buf);

    push_u16(&mut buf, 1);
    push_entry(&mut buf, TAG_GPS_POINTER, TYPE_LONG, 1, GPS_IFD.to_le_bytes());
    push_u32(&mut buf, 0);

    push_u16(&mut buf, 4);
    push_entry(&mut buf, TAG_GPS_LATITUDE_REF, TYPE_ASCII, 2, [lat_ref, 0, 0, 0]);
    push_entry(&mut buf, TAG_GPS_LATITUDE, TYPE_RATIONAL, 3, DATA.to_le_bytes());
    push_entry(&mut buf, TAG_GPS_LONGITUDE_REF, TYPE_ASCII, 2, [lon_ref, 0, 0, 0]);
    push_entry(
        &mut buf,
        TAG_GPS_LONGITUDE,
        TYPE_RATIONAL,
        3,
        (DATA + 24).to_le_bytes(),
    );
    push_u32(&mut buf, 0);

    for (num, denom) in dms_rationals(latitude)
        .into_iter()
        .chain(dms_rationals(longitude))
    {
        push_u32(&mut buf, num);
        push_u32(&mut buf, denom);
    }
    buf
}

/// A TIFF block with only an Orientation tag: valid EXIF, no GPS.
pub fn plain_tiff() -> Vec<u8> {
    let mut buf = Vec::new();
    tiff_header(&mut buf);
    push_u16(&mut buf, 1);
    push_entry(&mut buf, TAG_ORIENTATION, TYPE_SHORT, 1, [1, 0, 0, 0]);
    push_u32(&mut buf, 0);
    buf
}

// =========================================================================
// Container encoding
// =========================================================================

fn encode_blank(format: ImageFormat) -> Vec<u8> {
    let mut encoded = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(8, 8))
        .write_to(&mut Cursor::new(&mut encoded), format)
        .unwrap();
    encoded
}

/// A blank JPEG, with an APP1 EXIF segment right after SOI when `exif` is set.
pub fn jpeg_bytes(exif: Option<&[u8]>) -> Vec<u8> {
    let encoded = encode_blank(ImageFormat::Jpeg);
    let Some(tiff) = exif else {
        return encoded;
    };
    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
    let mut out = Vec::with_capacity(encoded.len() + tiff.len() + 10);
    out.extend_from_slice(&encoded[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&encoded[2..]);
    out
}

/// A blank PNG, with an `eXIf` chunk right after IHDR when `exif` is set.
///
/// The chunk CRC is left zeroed; EXIF readers do not verify it.
pub fn png_bytes(exif: Option<&[u8]>) -> Vec<u8> {
    let encoded = encode_blank(ImageFormat::Png);
    let Some(tiff) = exif else {
        return encoded;
    };
    // 8-byte signature + IHDR chunk (4 len + 4 type + 13 data + 4 crc)
    let after_ihdr = 33;
    let mut out = Vec::with_capacity(encoded.len() + tiff.len() + 12);
    out.extend_from_slice(&encoded[..after_ihdr]);
    out.extend_from_slice(&u32::try_from(tiff.len()).unwrap().to_be_bytes());
    out.extend_from_slice(b"eXIf");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out.extend_from_slice(&encoded[after_ihdr..]);
    out
}

// =========================================================================
// Fixture files
// =========================================================================

/// Write a JPEG carrying the given GPS position into `dir` and return its path.
pub fn write_gps_jpeg(dir: &Path, name: &str, latitude: f64, longitude: f64) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, jpeg_bytes(Some(&gps_tiff(latitude, longitude)))).unwrap();
    path
}

/// Create `<root>/images` and return it.
pub fn images_dir(root: &Path) -> PathBuf {
    let dir = root.join("images");
    std::fs::create_dir(&dir).unwrap();
    dir
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
