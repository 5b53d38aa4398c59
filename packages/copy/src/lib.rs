//! Merge-copy of files and directory trees.
//!
//! This crate provides the copy primitives behind the data migration:
//!
//! * Overwriting file copies that preserve permissions and timestamps
//! * Directory merges into a possibly existing target, via a serial `jwalk` walk
//! * Copy-on-write support via `reflink-copy` (APFS, Btrfs, `ReFS`) for fresh targets
//! * Progress callbacks for UI integration
//!
//! # Example
//!
//! ```rust,ignore
//! use chroma_migrate_copy::{CopyProgress, merge_directory};
//!
//! let files_copied = merge_directory(source, target, |progress: &CopyProgress| {
//!     println!("{}/{} files copied", progress.files_copied, progress.files_total);
//! })?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod error;
mod metadata;
mod progress;

pub use copy::{merge_directory, overwrite_file};
pub use error::CopyError;
pub use progress::CopyProgress;
