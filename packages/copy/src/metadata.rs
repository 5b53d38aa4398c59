//! Permission and timestamp preservation for copied paths.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use filetime::{FileTime, set_file_times};

use crate::error::CopyError;

/// Apply the permissions and access/modification times of `source` to `target`.
///
/// Symlinks in `source` are followed, so the metadata of the file or directory
/// they point at is what gets applied.
///
/// # Errors
///
/// * If the source metadata cannot be read
/// * If the permissions or timestamps cannot be set on the target
pub fn preserve_metadata(source: &Path, target: &Path) -> Result<(), CopyError> {
    let metadata = fs::metadata(source).map_err(|e| CopyError::MetadataError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    fs::set_permissions(target, metadata.permissions()).map_err(|e| {
        CopyError::PreserveMetadataError {
            path: target.to_path_buf(),
            io_error: e,
        }
    })?;

    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);
    set_file_times(target, accessed, modified).map_err(|e| CopyError::PreserveMetadataError {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    log::trace!("Preserved metadata {} -> {}", source.display(), target.display());

    Ok(())
}
