//! The sort driver: scan, then locate and move each candidate in turn.
//!
//! ## Per-file pipeline
//!
//! ```text
//! PENDING ─┬─ no GPS ─────────────────────────────► NoGps
//!          └─ GPS ─┬─ geocoder error ─────────────► LocateFailed
//!                  └─ Place ─┬─ mkdir/rename error ► MoveFailed
//!                            └─────────────────────► Moved
//! ```
//!
//! Every outcome is terminal and none of them stops the run. Files are
//! handled one at a time in scan order; the next file starts only after the
//! previous one has reached its outcome. The only fatal error is an input
//! directory that cannot be listed.
//!
//! Progress is reported as [`SortEvent`]s over an optional channel so the
//! binary can print while the library stays free of stdout writes.

use crate::config::SorterConfig;
use crate::geocode::Geocoder;
use crate::gps;
use crate::relocate::relocate;
use crate::scan::{self, ScanError};
use crate::types::{Coordinate, ImageFile, Place};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SortError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

/// Settings the driver needs, resolved from [`SorterConfig`].
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Root of the destination tree.
    pub output_root: PathBuf,
    pub case_sensitive_extensions: bool,
}

impl SortOptions {
    pub fn from_config(config: &SorterConfig) -> Self {
        Self {
            output_root: PathBuf::from(&config.output_dir),
            case_sensitive_extensions: config.case_sensitive_extensions,
        }
    }
}

/// Progress events, sent in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum SortEvent {
    NoGps {
        file_name: String,
    },
    LocateFailed {
        file_name: String,
        error: String,
    },
    /// Sent after geocoding succeeds, before the move is attempted.
    Moving {
        file_name: String,
        place: Place,
    },
    MoveFailed {
        file_name: String,
        error: String,
    },
    Moved {
        file_name: String,
        destination: PathBuf,
    },
}

/// Terminal state of one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    NoGps,
    LocateFailed(String),
    MoveFailed(String),
    Moved(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub file_name: String,
    pub outcome: FileOutcome,
}

/// Everything that happened during one run, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortReport {
    pub files: Vec<FileReport>,
}

impl SortReport {
    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn moved(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Moved(_)))
    }

    pub fn without_gps(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::NoGps))
    }

    pub fn locate_failures(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::LocateFailed(_)))
    }

    pub fn move_failures(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::MoveFailed(_)))
    }

    pub fn outcome_of(&self, file_name: &str) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| &f.outcome)
    }
}

/// Sort every candidate image in `input` into `options.output_root`.
pub fn sort_directory(
    input: &Path,
    geocoder: &impl Geocoder,
    options: &SortOptions,
    events: Option<Sender<SortEvent>>,
) -> Result<SortReport, SortError> {
    let images = scan::find_images(input, options.case_sensitive_extensions)?;
    log::info!("{} candidate images in {}", images.len(), input.display());

    let emit = |event: SortEvent| {
        if let Some(tx) = &events {
            // a closed receiver only means nobody is listening
            tx.send(event).ok();
        }
    };

    let mut report = SortReport::default();
    for image in &images {
        let outcome = sort_one(image, geocoder, options, &emit);
        report.files.push(FileReport {
            file_name: image.file_name.clone(),
            outcome,
        });
    }
    Ok(report)
}

fn sort_one(
    image: &ImageFile,
    geocoder: &impl Geocoder,
    options: &SortOptions,
    emit: &impl Fn(SortEvent),
) -> FileOutcome {
    let file_name = image.file_name.clone();

    let coordinate = match gps::read_coordinate(&image.path) {
        Ok(coordinate) => coordinate,
        Err(err) => {
            log::debug!("{file_name}: {err}");
            emit(SortEvent::NoGps { file_name });
            return FileOutcome::NoGps;
        }
    };

    let place = match geocoder.locate(coordinate) {
        Ok(place) => place,
        Err(err) => {
            let error = err.to_string();
            emit(SortEvent::LocateFailed {
                file_name,
                error: error.clone(),
            });
            return FileOutcome::LocateFailed(error);
        }
    };

    emit(SortEvent::Moving {
        file_name: file_name.clone(),
        place: place.clone(),
    });

    match relocate(&image.path, &options.output_root, &place) {
        Ok(destination) => {
            emit(SortEvent::Moved {
                file_name,
                destination: destination.clone(),
            });
            FileOutcome::Moved(destination)
        }
        Err(err) => {
            let error = err.to_string();
            emit(SortEvent::MoveFailed {
                file_name,
                error: error.clone(),
            });
            FileOutcome::MoveFailed(error)
        }
    }
}

/// GPS status of one candidate, as reported by `geosort check`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckEntry {
    pub file_name: String,
    pub coordinate: Option<Coordinate>,
}

/// Read the GPS position of every candidate without geocoding or moving.
pub fn check_directory(input: &Path, case_sensitive: bool) -> Result<Vec<CheckEntry>, SortError> {
    let images = scan::find_images(input, case_sensitive)?;
    Ok(images
        .into_iter()
        .map(|image| {
            let coordinate = gps::read_coordinate(&image.path)
                .inspect_err(|err| log::debug!("{}: {err}", image.file_name))
                .ok();
            CheckEntry {
                file_name: image.file_name,
                coordinate,
            }
        })
        .collect())
}
