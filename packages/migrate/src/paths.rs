//! Source and destination locations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Legacy data directory, relative to the project root.
pub const LEGACY_DATA_DIR: &[&str] = &["src", "chroma", "data"];

/// Current data directory, relative to the project root.
pub const CURRENT_DATA_DIR: &[&str] = &["src", "chroma_mcp", "data"];

/// The pair of directories a migration moves data between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPaths {
    /// Directory the data is copied from. Never modified.
    pub source: PathBuf,
    /// Directory the data is copied into.
    pub destination: PathBuf,
}

impl MigrationPaths {
    /// Create a path pair, normalising both paths.
    #[must_use]
    pub fn new(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Self {
        Self {
            source: source.as_ref().clean(),
            destination: destination.as_ref().clean(),
        }
    }

    /// The legacy and current data directories below `root`.
    ///
    /// A root of `.` yields the relative paths `src/chroma/data` and
    /// `src/chroma_mcp/data`.
    #[must_use]
    pub fn from_root(root: &Path) -> Self {
        Self::new(join_all(root, LEGACY_DATA_DIR), join_all(root, CURRENT_DATA_DIR))
    }
}

fn join_all(root: &Path, segments: &[&str]) -> PathBuf {
    segments
        .iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_root_relative() {
        let paths = MigrationPaths::from_root(Path::new("."));

        assert_eq!(paths.source, Path::new("src").join("chroma").join("data"));
        assert_eq!(
            paths.destination,
            Path::new("src").join("chroma_mcp").join("data")
        );
    }

    #[test]
    fn test_from_root_absolute() {
        let root = Path::new("/srv/app");
        let paths = MigrationPaths::from_root(root);

        assert_eq!(paths.source, root.join("src/chroma/data"));
        assert_eq!(paths.destination, root.join("src/chroma_mcp/data"));
    }

    #[test]
    fn test_new_cleans_paths() {
        let paths = MigrationPaths::new("a/./b/../old", "a//new/");

        assert_eq!(paths.source, Path::new("a/old"));
        assert_eq!(paths.destination, Path::new("a/new"));
    }
}
