//! Core domain logic for the Bookshelf personal catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod sample;
pub mod search;
pub mod service;

pub use config::{LibraryConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, BookStatus, BookValidationError, UNASSIGNED_ID};
pub use model::timestamp::{Timestamp, TimestampError, TIMESTAMP_FORMAT};
pub use report::{LogReporter, MemoryReporter, Reporter};
pub use repo::book_file::{BookStorage, JsonBookFile, RepoError, RepoResult};
pub use search::criteria::{CriterionError, SearchCriterion, SearchField};
pub use service::library::{Library, LibraryError, LibraryResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
