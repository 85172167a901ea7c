//! Catalog search entry points.
//!
//! # Responsibility
//! - Expose typed, conjunctive exact-match criteria over book fields.

pub mod criteria;
