//! Merge-copy implementation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CopyError;
use crate::metadata::preserve_metadata;
use crate::progress::CopyProgress;

/// Entry collected during directory enumeration.
#[derive(Debug, Clone)]
struct TreeEntry {
    /// Source path.
    source: PathBuf,
    /// Target path.
    target: PathBuf,
    /// Number of path components below the walk root.
    depth: usize,
}

/// Entries of a source tree, split by kind.
#[derive(Debug, Default)]
struct TreeListing {
    directories: Vec<TreeEntry>,
    files: Vec<TreeEntry>,
}

/// Copy a single file, overwriting the target if it exists.
///
/// Parent directories of the target are created as needed. The source's
/// permissions and timestamps are applied to the target afterwards.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `target` - Target file path
///
/// # Errors
///
/// * If the parent directory cannot be created
/// * If the source is missing or the copy operation fails
/// * If metadata cannot be preserved
pub fn overwrite_file(source: &Path, target: &Path) -> Result<(), CopyError> {
    log::debug!(
        "Overwriting file: {} -> {}",
        source.display(),
        target.display()
    );

    if let Some(parent) = target.parent() {
        create_dir(parent)?;
    }

    copy_file_with_reflink(source, target)?;
    preserve_metadata(source, target)
}

/// Merge a directory tree into a target directory.
///
/// Returns the number of files copied.
///
/// The target may already exist. Files present in both trees are overwritten
/// with the source version; anything only in the target is left alone.
/// Symlinks are followed, so linked files and directories are copied as
/// their contents. The walk is serial.
///
/// # Arguments
///
/// * `source` - Source directory path
/// * `target` - Target directory path
/// * `on_progress` - Callback invoked before the first file and after each copied file
///
/// # Errors
///
/// * If the source is missing or enumeration fails
/// * If any directory or file copy fails (the remaining files are not attempted)
pub fn merge_directory<F>(
    source: &Path,
    target: &Path,
    mut on_progress: F,
) -> Result<u64, CopyError>
where
    F: FnMut(&CopyProgress),
{
    log::debug!(
        "Merging directory: {} -> {}",
        source.display(),
        target.display()
    );

    fs::metadata(source).map_err(|e| CopyError::MetadataError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    let mut listing = enumerate_directory(source, target)?;
    let total_files = listing.files.len() as u64;

    log::debug!(
        "Found {} files in {} directories",
        total_files,
        listing.directories.len()
    );

    for dir in &listing.directories {
        create_dir(&dir.target)?;
    }

    on_progress(&CopyProgress::new(total_files, 0, None));

    for (copied, entry) in (1_u64..).zip(&listing.files) {
        copy_file_with_reflink(&entry.source, &entry.target)?;
        preserve_metadata(&entry.source, &entry.target)?;

        on_progress(&CopyProgress::new(
            total_files,
            copied,
            Some(entry.source.to_string_lossy().to_string()),
        ));
    }

    // Children first, so writing into a directory doesn't clobber its times
    listing.directories.sort_by_key(|dir| Reverse(dir.depth));
    for dir in &listing.directories {
        preserve_metadata(&dir.source, &dir.target)?;
    }

    Ok(total_files)
}

/// Enumerate a source tree with a serial jwalk traversal.
///
/// The root itself is included as a directory entry at depth 0.
fn enumerate_directory(source: &Path, target: &Path) -> Result<TreeListing, CopyError> {
    let mut listing = TreeListing::default();

    for entry in jwalk::WalkDir::new(source)
        .skip_hidden(false)
        .follow_links(true)
        .parallelism(jwalk::Parallelism::Serial)
    {
        let entry = entry.map_err(|e| CopyError::EnumerationError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let source_path = entry.path();

        let rel_path =
            source_path
                .strip_prefix(source)
                .map_err(|_| CopyError::EnumerationError {
                    path: source_path.clone(),
                    message: "Failed to strip prefix".to_string(),
                })?;

        let tree_entry = TreeEntry {
            // Joining an empty path would leave a trailing separator on the root
            target: if rel_path.as_os_str().is_empty() {
                target.to_path_buf()
            } else {
                target.join(rel_path)
            },
            depth: rel_path.components().count(),
            source: source_path.clone(),
        };

        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && source_path.is_dir()) {
            listing.directories.push(tree_entry);
        } else {
            listing.files.push(tree_entry);
        }
    }

    Ok(listing)
}

fn create_dir(path: &Path) -> Result<(), CopyError> {
    fs::create_dir_all(path).map_err(|e| CopyError::CreateDirError {
        path: path.to_path_buf(),
        io_error: e,
    })
}

/// Copy a single file, trying reflink first then falling back to regular copy.
///
/// Reflinks only work onto a fresh path, so an existing target always goes
/// through a regular overwriting copy.
fn copy_file_with_reflink(source: &Path, target: &Path) -> Result<(), CopyError> {
    if !target.exists() && reflink_copy::reflink(source, target).is_ok() {
        log::trace!("Reflinked {} -> {}", source.display(), target.display());
        return Ok(());
    }

    fs::copy(source, target).map_err(|e| CopyError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    })?;
    log::trace!("Copied {} -> {}", source.display(), target.display());

    Ok(())
}
