//! Typed search criteria over book fields.
//!
//! # Responsibility
//! - Provide the closed set of searchable fields.
//! - Convert raw user input into typed criteria.
//!
//! # Invariants
//! - Matching is exact equality; no case folding or substring logic.
//! - Criteria lists are conjunctive.

use crate::model::book::{Book, BookStatus};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Searchable book field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Year,
    Status,
}

impl SearchField {
    /// Parses a field name such as `title` or ` Year `.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "year" => Some(Self::Year),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Year => "year",
            Self::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionError {
    UnknownField(String),
    InvalidYear(String),
    InvalidStatus(String),
}

impl Display for CriterionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(field) => write!(
                f,
                "unknown search field `{field}`; expected title|author|year|status"
            ),
            Self::InvalidYear(value) => write!(f, "year must be an integer, got `{value}`"),
            Self::InvalidStatus(value) => write!(
                f,
                "unknown status `{value}`; expected available|checked_out"
            ),
        }
    }
}

impl Error for CriterionError {}

/// One exact-match condition on a book field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriterion {
    Title(String),
    Author(String),
    Year(i32),
    Status(BookStatus),
}

impl SearchCriterion {
    /// Builds a criterion from raw field/value input.
    ///
    /// Text values are kept verbatim so matching stays exact.
    pub fn from_input(field: &str, value: &str) -> Result<Self, CriterionError> {
        let field = SearchField::parse(field)
            .ok_or_else(|| CriterionError::UnknownField(field.trim().to_string()))?;
        Self::for_field(field, value)
    }

    pub fn for_field(field: SearchField, value: &str) -> Result<Self, CriterionError> {
        match field {
            SearchField::Title => Ok(Self::Title(value.to_string())),
            SearchField::Author => Ok(Self::Author(value.to_string())),
            SearchField::Year => value
                .trim()
                .parse::<i32>()
                .map(Self::Year)
                .map_err(|_| CriterionError::InvalidYear(value.to_string())),
            SearchField::Status => BookStatus::parse(value)
                .map(Self::Status)
                .ok_or_else(|| CriterionError::InvalidStatus(value.to_string())),
        }
    }

    pub fn field(&self) -> SearchField {
        match self {
            Self::Title(_) => SearchField::Title,
            Self::Author(_) => SearchField::Author,
            Self::Year(_) => SearchField::Year,
            Self::Status(_) => SearchField::Status,
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Self::Title(title) => book.title == *title,
            Self::Author(author) => book.author == *author,
            Self::Year(year) => book.year == *year,
            Self::Status(status) => book.status == *status,
        }
    }
}

/// Returns whether `book` satisfies every criterion.
pub fn matches_all(criteria: &[SearchCriterion], book: &Book) -> bool {
    criteria.iter().all(|criterion| criterion.matches(book))
}
