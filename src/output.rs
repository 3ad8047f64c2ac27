//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Sort
//!
//! One line per event, nothing for a successful move beyond its `Moving`
//! line:
//!
//! ```text
//! No GPS data found for nogps.png
//! Error getting location for broken.jpg: API error: 503
//! Moving trip.jpg to United States/California/Unknown/San Francisco County
//! Error moving file: cannot create sorted_images/United_States: File exists (os error 17)
//! ```
//!
//! Place names are shown as returned by the geocoder, with spaces; the
//! directories on disk use the sanitized form.
//!
//! ## Check
//!
//! ```text
//! trip.jpg: 37.774900, -122.419400
//! nogps.png: no GPS data
//! 1 of 2 images have GPS data
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure,
//! with no I/O.

use crate::sort::{CheckEntry, SortEvent, SortReport};

// ============================================================================
// Sort output
// ============================================================================

/// Format a single sort progress event as display lines.
pub fn format_sort_event(event: &SortEvent) -> Vec<String> {
    match event {
        SortEvent::NoGps { file_name } => vec![format!("No GPS data found for {file_name}")],
        SortEvent::LocateFailed { file_name, error } => {
            vec![format!("Error getting location for {file_name}: {error}")]
        }
        SortEvent::Moving { file_name, place } => {
            vec![format!("Moving {file_name} to {}", place.display_path())]
        }
        SortEvent::MoveFailed { error, .. } => vec![format!("Error moving file: {error}")],
        SortEvent::Moved { .. } => Vec::new(),
    }
}

/// Print a sort progress event to stdout.
pub fn print_sort_event(event: &SortEvent) {
    for line in format_sort_event(event) {
        println!("{}", line);
    }
}

/// One-line run summary. Logged rather than printed so stdout carries only
/// per-file lines.
pub fn format_sort_summary(report: &SortReport) -> String {
    format!(
        "Sorted {} of {} images ({} without GPS, {} geocoding errors, {} move errors)",
        report.moved(),
        report.files.len(),
        report.without_gps(),
        report.locate_failures(),
        report.move_failures()
    )
}

// ============================================================================
// Check output
// ============================================================================

pub fn format_check_output(entries: &[CheckEntry]) -> Vec<String> {
    let mut lines: Vec<String> = entries
        .iter()
        .map(|entry| match entry.coordinate {
            Some(c) => format!("{}: {:.6}, {:.6}", entry.file_name, c.latitude, c.longitude),
            None => format!("{}: no GPS data", entry.file_name),
        })
        .collect();

    let with_gps = entries.iter().filter(|e| e.coordinate.is_some()).count();
    lines.push(format!(
        "{} of {} images have GPS data",
        with_gps,
        entries.len()
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(entries: &[CheckEntry]) {
    for line in format_check_output(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
