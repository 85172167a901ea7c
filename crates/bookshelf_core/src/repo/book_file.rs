//! Book storage contract and JSON file implementation.
//!
//! # Responsibility
//! - Read and write whole book sequences as JSON arrays.
//! - Keep file-format details inside the persistence boundary.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it; the
//!   caller decides how to recover.
//! - Every save overwrites the file wholesale through a same-directory
//!   temporary file and an atomic rename.
//! - Records with a null id load as `UNASSIGNED_ID`; ids that are set must
//!   be unique.
//! - Output is UTF-8 with non-ASCII text left unescaped.

use crate::model::book::{Book, BookId, UNASSIGNED_ID};
use chrono::Local;
use log::{debug, error};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error for catalog files.
#[derive(Debug)]
pub enum RepoError {
    /// Catalog file does not exist yet.
    Missing(PathBuf),
    /// File exists but does not hold a valid book sequence.
    Malformed { path: PathBuf, message: String },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "catalog file not found: {}", path.display()),
            Self::Malformed { path, message } => {
                write!(f, "malformed catalog file `{}`: {message}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "i/o error on catalog file `{}`: {source}", path.display())
            }
            Self::Encode { path, source } => {
                write!(f, "failed to encode catalog file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::Missing(_) | Self::Malformed { .. } => None,
        }
    }
}

/// Whole-sequence persistence for book records.
pub trait BookStorage {
    fn load(&self) -> RepoResult<Vec<Book>>;
    fn save(&self, books: &[Book]) -> RepoResult<()>;

    /// Copies the current stored content aside so a later `save` cannot
    /// destroy it. Returns where the copy went, if anywhere.
    fn backup(&self) -> RepoResult<Option<PathBuf>> {
        Ok(None)
    }
}

/// JSON array file holding a book sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBookFile {
    path: PathBuf,
}

impl JsonBookFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, message: impl Into<String>) -> RepoError {
        RepoError::Malformed {
            path: self.path.clone(),
            message: message.into(),
        }
    }

    fn io(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomic(&self, books: &[Book]) -> RepoResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|err| self.io(err))?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(|err| self.io(err))?;
        {
            let mut serializer = serde_json::Serializer::with_formatter(
                temp.as_file_mut(),
                PrettyFormatter::with_indent(b"    "),
            );
            books
                .serialize(&mut serializer)
                .map_err(|source| RepoError::Encode {
                    path: self.path.clone(),
                    source,
                })?;
        }
        temp.write_all(b"\n").map_err(|err| self.io(err))?;
        temp.as_file().sync_all().map_err(|err| self.io(err))?;
        temp.persist(&self.path).map_err(|err| self.io(err.error))?;
        Ok(())
    }
}

impl BookStorage for JsonBookFile {
    fn load(&self) -> RepoResult<Vec<Book>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=catalog_load module=repo status=missing path={}",
                    self.path.display()
                );
                return Err(RepoError::Missing(self.path.clone()));
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                return Err(self.malformed(format!("content is not UTF-8: {err}")));
            }
            Err(err) => return Err(self.io(err)),
        };

        if contents.trim().is_empty() {
            return Err(self.malformed("file is empty"));
        }

        let books: Vec<Book> =
            serde_json::from_str(&contents).map_err(|err| self.malformed(err.to_string()))?;
        check_sequence(&books).map_err(|message| self.malformed(message))?;

        debug!(
            "event=catalog_load module=repo status=ok count={} path={}",
            books.len(),
            self.path.display()
        );
        Ok(books)
    }

    fn save(&self, books: &[Book]) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.write_atomic(books) {
            Ok(()) => {
                debug!(
                    "event=catalog_save module=repo status=ok count={} duration_ms={} path={}",
                    books.len(),
                    started_at.elapsed().as_millis(),
                    self.path.display()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=catalog_save module=repo status=error duration_ms={} path={} error={}",
                    started_at.elapsed().as_millis(),
                    self.path.display(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Copies the file to `<name>.bak-<YYYYmmddHHMMSS>` next to it.
    fn backup(&self) -> RepoResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(format!(".bak-{}", Local::now().format("%Y%m%d%H%M%S")));
        let backup_path = self.path.with_file_name(name);

        fs::copy(&self.path, &backup_path).map_err(|err| self.io(err))?;
        debug!(
            "event=catalog_backup module=repo status=ok path={} backup={}",
            self.path.display(),
            backup_path.display()
        );
        Ok(Some(backup_path))
    }
}

fn check_sequence(books: &[Book]) -> Result<(), String> {
    let mut seen: HashSet<BookId> = HashSet::with_capacity(books.len());
    for book in books {
        book.validate()
            .map_err(|err| format!("book {}: {err}", book.id))?;
        if book.id != UNASSIGNED_ID && !seen.insert(book.id) {
            return Err(format!("duplicate book id {}", book.id));
        }
    }
    Ok(())
}
