//! Candidate discovery in the input directory.
//!
//! Only the immediate entries of the input directory are considered.
//! Subdirectories are skipped, never descended into. An entry is a candidate
//! when it is not a directory and its name ends in `.jpg`, `.jpeg` or `.png`.
//!
//! ```text
//! images/
//! ├── trip.jpg        ✓ candidate
//! ├── IMG_0042.JPG    ✓ candidate (✗ with case_sensitive_extensions)
//! ├── scan.png        ✓ candidate
//! ├── note.txt        ✗ not an image
//! ├── photo.jpg.bak   ✗ wrong suffix
//! └── 2019/           ✗ directory, not recursed
//!     └── old.jpg
//! ```
//!
//! Candidates are returned sorted by file name, which is the order the
//! driver processes them in.

use crate::types::ImageFile;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read input directory {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Whether a file name carries one of the supported image extensions.
///
/// With `case_sensitive` the suffix must match exactly (`.jpg` but not
/// `.JPG`); otherwise ASCII case is ignored.
pub fn has_image_extension(file_name: &str, case_sensitive: bool) -> bool {
    let Some((_, ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS.iter().any(|candidate| {
        if case_sensitive {
            ext == *candidate
        } else {
            ext.eq_ignore_ascii_case(candidate)
        }
    })
}

/// List candidate images directly inside `dir`, sorted by file name.
///
/// Fails only when the directory itself cannot be read.
pub fn find_images(dir: &Path, case_sensitive: bool) -> Result<Vec<ImageFile>, ScanError> {
    let unreadable = |source| ScanError::Unreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(0)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(unreadable(err)),
            Err(err) => {
                log::warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if entry.depth() == 0 {
            if !entry.file_type().is_dir() {
                return Err(ScanError::NotADirectory(dir.to_path_buf()));
            }
            continue;
        }
        if entry.file_type().is_dir() {
            log::debug!("skipping directory {}", entry.path().display());
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !has_image_extension(&file_name, case_sensitive) {
            continue;
        }
        log::debug!("found candidate {file_name}");
        images.push(ImageFile {
            path: entry.path().to_path_buf(),
            file_name,
        });
    }

    Ok(images)
}
