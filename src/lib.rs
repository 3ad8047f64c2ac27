//! # Geosort
//!
//! Sorts photos into folders by where they were taken. Each JPEG or PNG in
//! the input directory that carries an EXIF GPS position is reverse geocoded
//! against OpenStreetMap Nominatim and moved into a four-level tree:
//!
//! ```text
//! images/trip.jpg
//!   → sorted_images/United_States/California/Unknown/San_Francisco_County/trip.jpg
//! ```
//!
//! # Architecture: One Pass, One File at a Time
//!
//! ```text
//! scan       images/   →  candidates        (top-level .jpg/.jpeg/.png)
//! gps        candidate →  Coordinate        (EXIF GPS, signed degrees)
//! geocode    Coordinate → Place             (Nominatim reverse lookup)
//! relocate   Place     →  sorted_images/…   (mkdir -p + rename)
//! ```
//!
//! The [`sort`] driver runs these steps for each candidate in name order.
//! A file that fails any step is reported and left where it is; the run
//! continues with the next one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists candidate images directly inside the input directory |
//! | [`gps`] | Reads and converts the EXIF GPS position |
//! | [`geocode`] | [`geocode::Geocoder`] trait and the throttled Nominatim client |
//! | [`relocate`] | Builds the destination path and moves the file |
//! | [`naming`] | Path segment sanitizing |
//! | [`sort`] | Per-file pipeline, progress events and the run report |
//! | [`config`] | `geosort.toml` loading, layering and validation |
//! | [`types`] | `Coordinate`, `Place`, `ImageFile` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Sequential Requests
//!
//! The public Nominatim service allows one request per second. Files are
//! processed strictly one after another, and the client's throttle spaces
//! requests by `min_interval_ms` (1000 by default).
//!
//! ## Files Without GPS Stay Put
//!
//! An image without a usable GPS position is reported and left in the input
//! directory. Nothing is ever copied; a file either moves or stays.
//!
//! ## Geocoder Behind a Trait
//!
//! The driver takes any [`geocode::Geocoder`], so tests run the whole
//! pipeline against canned responses with no network.

pub mod config;
pub mod geocode;
pub mod gps;
pub mod naming;
pub mod output;
pub mod relocate;
pub mod scan;
pub mod sort;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
