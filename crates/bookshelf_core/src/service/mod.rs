//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate storage calls into catalog-level operations.
//! - Keep CLI callers decoupled from file details.

pub mod library;
