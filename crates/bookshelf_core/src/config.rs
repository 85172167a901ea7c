//! Catalog and logging configuration.
//!
//! # Responsibility
//! - Name the two catalog files (all books, deleted books).
//! - Carry logging options from the CLI into `init_logging`.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DEFAULT_LIBRARY_FILE: &str = "library.json";
pub const DEFAULT_DELETED_FILE: &str = "deleted_books.json";

/// Locations of the persisted catalog files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Every book ever added, active and soft-deleted.
    pub library_file: PathBuf,
    /// Soft-deleted subset.
    pub deleted_file: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            library_file: PathBuf::from(DEFAULT_LIBRARY_FILE),
            deleted_file: PathBuf::from(DEFAULT_DELETED_FILE),
        }
    }
}

impl LibraryConfig {
    pub fn new(library_file: impl Into<PathBuf>, deleted_file: impl Into<PathBuf>) -> Self {
        Self {
            library_file: library_file.into(),
            deleted_file: deleted_file.into(),
        }
    }

    /// Places both default file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            library_file: dir.join(DEFAULT_LIBRARY_FILE),
            deleted_file: dir.join(DEFAULT_DELETED_FILE),
        }
    }
}

/// Logging options passed to [`crate::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rotating log files. Console-only when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}
