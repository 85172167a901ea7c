//! Persistence layer abstractions and file implementations.
//!
//! # Responsibility
//! - Define the whole-sequence storage contract used by the library store.
//! - Isolate JSON file details from store orchestration.
//!
//! # Invariants
//! - Load paths validate every record before returning it.
//! - Storage APIs distinguish a missing file from malformed content.

pub mod book_file;
