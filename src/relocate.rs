//! Moving an image into the place-keyed destination tree.
//!
//! ```text
//! <root>/<country>/<state>/<state_district>/<county>/<basename>
//! ```
//!
//! Each level is the [`Place`] field passed through
//! [`sanitize_segment`](crate::naming::sanitize_segment). Missing
//! intermediate directories are created with default permissions. The base
//! filename is kept exactly; an existing file of the same name at the
//! destination is handled by the platform's rename (replaced on Unix).
//! Nothing is cleaned up if creation succeeds but the rename fails.

use crate::naming::sanitize_segment;
use crate::types::Place;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelocateError {
    #[error("cannot create {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot move {} to {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("source has no file name: {}", .0.display())]
    NoFileName(PathBuf),
}

/// Destination directory for a place under `root`.
pub fn destination_dir(root: &Path, place: &Place) -> PathBuf {
    place
        .levels()
        .iter()
        .fold(root.to_path_buf(), |dir, level| dir.join(sanitize_segment(level)))
}

/// Move `source` into the tree under `root` and return its new path.
pub fn relocate(source: &Path, root: &Path, place: &Place) -> Result<PathBuf, RelocateError> {
    let file_name = source
        .file_name()
        .ok_or_else(|| RelocateError::NoFileName(source.to_path_buf()))?;

    let dir = destination_dir(root, place);
    fs::create_dir_all(&dir).map_err(|err| RelocateError::CreateDir {
        path: dir.clone(),
        source: err,
    })?;

    let target = dir.join(file_name);
    fs::rename(source, &target).map_err(|err| RelocateError::Rename {
        from: source.to_path_buf(),
        to: target.clone(),
        source: err,
    })?;
    Ok(target)
}
