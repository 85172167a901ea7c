//! Library store: the in-memory catalog and its JSON mirror.
//!
//! # Responsibility
//! - Own every book record in insertion order, active and soft-deleted.
//! - Assign identity, apply mutations, and persist after each one.
//! - Report human-readable progress through the injected [`Reporter`].
//!
//! # Invariants
//! - Ids are unique and never reused: `next_id` is one past the highest id
//!   ever loaded or assigned.
//! - Loaded records without an id, or repeating an earlier id, get fresh
//!   ids from `next_id` in catalog order.
//! - A catalog that fails to load is backed up before anything can
//!   overwrite it.
//! - Id lookup goes through `index`, never through sequence position.
//! - Soft-deleted books stay in `records`; `deleted` mirrors them in
//!   deletion order.
//! - Not-found and invalid-status requests are reported no-ops, not errors.
//! - Storage failures propagate; in-memory state is not rolled back.

use crate::config::LibraryConfig;
use crate::model::book::{Book, BookId, BookStatus, BookValidationError};
use crate::model::timestamp::Timestamp;
use crate::report::Reporter;
use crate::repo::book_file::{BookStorage, JsonBookFile, RepoError};
use crate::search::criteria::{matches_all, SearchCriterion};
use log::Level;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug)]
pub enum LibraryError {
    Validation(BookValidationError),
    Repo(RepoError),
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<BookValidationError> for LibraryError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for LibraryError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Book catalog backed by two storages: all books, and deleted books.
pub struct Library<S: BookStorage, R: Reporter> {
    records: Vec<Book>,
    index: HashMap<BookId, usize>,
    deleted: Vec<Book>,
    next_id: BookId,
    storage: S,
    deleted_storage: S,
    reporter: R,
}

impl<R: Reporter> Library<JsonBookFile, R> {
    /// Opens the catalog files named by `config`.
    ///
    /// Never fails: a missing or unreadable catalog yields an empty library.
    pub fn open(config: &LibraryConfig, reporter: R) -> Self {
        Self::with_storage(
            JsonBookFile::new(&config.library_file),
            JsonBookFile::new(&config.deleted_file),
            reporter,
        )
    }
}

impl<S: BookStorage, R: Reporter> Library<S, R> {
    /// Creates a library over explicit storages and loads existing books.
    ///
    /// Only the main storage is read; the deleted sequence is rebuilt from
    /// tombstoned records so both files agree after the next save.
    pub fn with_storage(storage: S, deleted_storage: S, reporter: R) -> Self {
        let loaded = match storage.load() {
            Ok(books) => books,
            Err(RepoError::Missing(_)) => Vec::new(),
            Err(err) => {
                reporter.warn(&format!("Could not read catalog ({err}); starting empty."));
                match storage.backup() {
                    Ok(Some(path)) => reporter.warn(&format!(
                        "Unreadable catalog kept at {}.",
                        path.display()
                    )),
                    Ok(None) => {}
                    Err(err) => reporter.report(
                        Level::Error,
                        &format!("Could not back up unreadable catalog: {err}"),
                    ),
                }
                Vec::new()
            }
        };

        let mut library = Self {
            records: Vec::new(),
            index: HashMap::new(),
            deleted: Vec::new(),
            next_id: 1,
            storage,
            deleted_storage,
            reporter,
        };
        library.rebuild(loaded);
        library
    }

    fn rebuild(&mut self, mut books: Vec<Book>) {
        self.index.clear();
        self.next_id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;

        for (position, book) in books.iter_mut().enumerate() {
            if !book.has_id() {
                book.id = self.next_id;
                self.next_id += 1;
                self.reporter.info(&format!(
                    "Book '{}' had no id; assigned id {}.",
                    book.title, book.id
                ));
            } else if self.index.contains_key(&book.id) {
                let duplicate = book.id;
                book.id = self.next_id;
                self.next_id += 1;
                self.reporter.warn(&format!(
                    "Duplicate book id {duplicate} for '{}'; reassigned id {}.",
                    book.title, book.id
                ));
            }
            self.index.insert(book.id, position);
        }

        self.deleted = books.iter().filter(|book| book.is_deleted()).cloned().collect();
        // Stable: books deleted in the same minute keep catalog order.
        self.deleted.sort_by_key(|book| book.deleted_at);
        self.records = books;
    }

    /// Adds an available book and returns its new id.
    ///
    /// # Errors
    /// - `Validation` when title or author is blank; nothing is stored.
    /// - `Repo` when the catalog file cannot be written.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> LibraryResult<BookId> {
        let id = self.next_id;
        let book = Book::new(id, title, author, year);
        book.validate()?;

        let message = format!("Book '{}' added with id {id}.", book.title);
        self.index.insert(id, self.records.len());
        self.records.push(book);
        self.next_id = id + 1;

        self.storage.save(&self.records)?;
        self.reporter.info(&message);
        Ok(id)
    }

    /// Soft-deletes an active book.
    ///
    /// Returns `Ok(false)` and reports when `id` is unknown or already
    /// deleted; nothing is mutated in that case.
    pub fn remove(&mut self, id: BookId) -> LibraryResult<bool> {
        let Some(position) = self.active_position(id) else {
            self.report_not_found(id);
            return Ok(false);
        };

        let book = &mut self.records[position];
        book.mark_deleted(Timestamp::now());
        self.deleted.push(book.clone());

        self.storage.save(&self.records)?;
        self.deleted_storage.save(&self.deleted)?;
        self.reporter.info(&format!("Book with id {id} removed."));
        Ok(true)
    }

    /// Changes the status of an active book from raw input.
    ///
    /// Unknown ids and unparseable statuses are reported no-ops returning
    /// `Ok(false)`.
    pub fn change_status(&mut self, id: BookId, new_status: &str) -> LibraryResult<bool> {
        let Some(position) = self.active_position(id) else {
            self.report_not_found(id);
            return Ok(false);
        };
        let Some(status) = BookStatus::parse(new_status) else {
            self.reporter.warn(&format!(
                "Invalid status '{}'. Allowed values: {}.",
                new_status.trim(),
                allowed_statuses()
            ));
            return Ok(false);
        };
        self.apply_status(position, status)
    }

    /// Typed variant of [`Library::change_status`].
    pub fn set_status(&mut self, id: BookId, status: BookStatus) -> LibraryResult<bool> {
        let Some(position) = self.active_position(id) else {
            self.report_not_found(id);
            return Ok(false);
        };
        self.apply_status(position, status)
    }

    fn apply_status(&mut self, position: usize, status: BookStatus) -> LibraryResult<bool> {
        let book = &mut self.records[position];
        book.status = status;
        let id = book.id;

        self.storage.save(&self.records)?;
        self.reporter.info(&format!(
            "Status of book with id {id} changed to '{}'.",
            status.as_wire()
        ));
        Ok(true)
    }

    /// Returns books, soft-deleted included, that match every criterion.
    ///
    /// An empty criteria list matches every book.
    pub fn search(&self, criteria: &[SearchCriterion]) -> Vec<&Book> {
        self.records
            .iter()
            .filter(|book| matches_all(criteria, book))
            .collect()
    }

    /// Reports one line per active book, in insertion order.
    ///
    /// Returns the number of books shown.
    pub fn display(&self) -> usize {
        if self.is_empty() {
            self.reporter.info("The library is empty.");
            return 0;
        }
        if self.active_count() == 0 {
            self.reporter.info("No active books to display.");
            return 0;
        }

        let mut shown = 0;
        for book in self.active_records() {
            self.reporter.info(&book.to_string());
            shown += 1;
        }
        shown
    }

    /// Looks up an active book by id.
    pub fn find_by_id(&self, id: BookId) -> Option<&Book> {
        self.active_position(id).map(|position| &self.records[position])
    }

    /// Looks up a book by id whether or not it is deleted.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    fn active_position(&self, id: BookId) -> Option<usize> {
        self.index
            .get(&id)
            .copied()
            .filter(|&position| self.records[position].is_active())
    }

    fn report_not_found(&self, id: BookId) {
        self.reporter.info(&format!("Book with id {id} not found."));
    }

    /// All books in insertion order, soft-deleted included.
    pub fn records(&self) -> &[Book] {
        &self.records
    }

    /// Soft-deleted books in deletion order.
    pub fn deleted_records(&self) -> &[Book] {
        &self.deleted
    }

    pub fn active_records(&self) -> impl Iterator<Item = &Book> {
        self.records.iter().filter(|book| book.is_active())
    }

    /// Number of stored books, soft-deleted included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no book was ever stored. A library holding only deleted
    /// books is not empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.active_records().count()
    }

    /// Id the next `add` will assign.
    pub fn next_id(&self) -> BookId {
        self.next_id
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}

fn allowed_statuses() -> String {
    BookStatus::ALL
        .iter()
        .map(|status| format!("'{}'", status.as_wire()))
        .collect::<Vec<_>>()
        .join(", ")
}
