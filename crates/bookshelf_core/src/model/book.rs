//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog record persisted by the library store.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused for another book.
//! - `deleted_at` is the source of truth for tombstone state and is set at
//!   most once.
//! - `title` and `author` are non-empty after trimming.

use crate::model::timestamp::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Catalog identifier, unique per store and never reused.
pub type BookId = u64;

/// Id of a record loaded with `"id": null` (or `0`); the store assigns a
/// real id before the record becomes addressable.
pub const UNASSIGNED_ID: BookId = 0;

/// Lending state of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// On the shelf.
    #[default]
    #[serde(alias = "в наличии")]
    Available,
    /// Lent out.
    #[serde(alias = "выдана")]
    CheckedOut,
}

impl BookStatus {
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::CheckedOut];

    /// Parses user or legacy input into a status.
    ///
    /// Accepts wire names (`available`, `checked_out`), human labels
    /// (`Available`, `CheckedOut`, `checked out`) and the legacy catalog
    /// names. Matching ignores case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "available" | "в наличии" => Some(Self::Available),
            "checked_out" | "checkedout" | "checked out" | "checked-out" | "выдана" => {
                Some(Self::CheckedOut)
            }
            _ => None,
        }
    }

    /// Stable wire name written to catalog files.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::CheckedOut => "checked_out",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::CheckedOut => "Checked out",
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title must not be empty"),
            Self::EmptyAuthor => write!(f, "book author must not be empty"),
        }
    }
}

impl Error for BookValidationError {}

/// Catalog record.
///
/// Serializes to the seven-key object stored in catalog files. Loading
/// restores both timestamps; files written before `created_at` existed get
/// the load time instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: BookStatus,
    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BookId, D::Error> {
    Ok(Option::<BookId>::deserialize(deserializer)?.unwrap_or(UNASSIGNED_ID))
}

impl Book {
    /// Creates an available, active book stamped with the current time.
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: BookStatus::Available,
            created_at: Timestamp::now(),
            deleted_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }
        Ok(())
    }

    /// Returns whether this book should be shown and targeted by updates.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn has_id(&self) -> bool {
        self.id != UNASSIGNED_ID
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Tombstones the book. Returns `false` if it was already deleted, in
    /// which case the original deletion time is kept.
    pub fn mark_deleted(&mut self, at: Timestamp) -> bool {
        if self.deleted_at.is_some() {
            return false;
        }
        self.deleted_at = Some(at);
        true
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}, Created: {}",
            self.id, self.title, self.author, self.year, self.status, self.created_at
        )?;
        if let Some(deleted_at) = self.deleted_at {
            write!(f, ", Deleted: {deleted_at}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookStatus, UNASSIGNED_ID};

    #[test]
    fn parse_accepts_labels_wire_and_legacy_names() {
        assert_eq!(BookStatus::parse(" Available "), Some(BookStatus::Available));
        assert_eq!(BookStatus::parse("CheckedOut"), Some(BookStatus::CheckedOut));
        assert_eq!(BookStatus::parse("checked_out"), Some(BookStatus::CheckedOut));
        assert_eq!(BookStatus::parse("выдана"), Some(BookStatus::CheckedOut));
        assert_eq!(BookStatus::parse("в наличии"), Some(BookStatus::Available));
        assert_eq!(BookStatus::parse("bogus"), None);
    }

    #[test]
    fn mark_deleted_is_one_time() {
        let mut book = Book::new(1, "Dune", "Frank Herbert", 1965);
        let first = crate::model::timestamp::Timestamp::parse("2024-January-02 10:00").unwrap();
        let second = crate::model::timestamp::Timestamp::parse("2025-March-03 11:00").unwrap();

        assert!(book.mark_deleted(first));
        assert!(!book.mark_deleted(second));
        assert_eq!(book.deleted_at, Some(first));
    }

    #[test]
    fn display_mentions_deletion_only_when_deleted() {
        let mut book = Book::new(3, "Dune", "Frank Herbert", 1965);
        let line = book.to_string();
        assert!(line.starts_with("ID: 3, Title: Dune, Author: Frank Herbert, Year: 1965"));
        assert!(!line.contains("Deleted"));

        book.mark_deleted(crate::model::timestamp::Timestamp::now());
        assert!(book.to_string().contains("Deleted: "));
    }

    #[test]
    fn null_id_loads_as_unassigned_but_missing_id_fails() {
        let book: Book = serde_json::from_value(serde_json::json!({
            "id": null, "title": "A", "author": "X", "year": 2000, "status": "available"
        }))
        .unwrap();
        assert_eq!(book.id, UNASSIGNED_ID);
        assert!(!book.has_id());

        let err = serde_json::from_value::<Book>(serde_json::json!({
            "title": "A", "author": "X", "year": 2000, "status": "available"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("missing field `id`"), "{err}");
    }
}
