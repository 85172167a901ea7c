//! Catalog domain model.
//!
//! # Responsibility
//! - Define the book record and its lending status.
//! - Define the minute-precision timestamps stored with every record.
//!
//! # Invariants
//! - Every book is identified by a store-assigned `BookId`.
//! - Deletion is represented by a `deleted_at` tombstone, not hard delete.

pub mod book;
pub mod timestamp;
