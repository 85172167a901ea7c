//! Sample-data generator for demo catalogs.
//!
//! Generated statuses are informational only: `Library::add` always stores
//! new books as available, so a sample marked checked out still lands on
//! the shelf.

use crate::model::book::{BookId, BookStatus};
use crate::report::Reporter;
use crate::repo::book_file::BookStorage;
use crate::service::library::{Library, LibraryResult};
use rand::seq::SliceRandom;
use rand::Rng;

const TITLE_WORDS: &[&str] = &[
    "Silent", "River", "Winter", "Garden", "Lost", "Empire", "Glass", "Shadow", "Northern",
    "Letters", "Iron", "Harbor", "Quiet", "Storm", "Golden", "Forest", "Midnight", "Paper",
    "Echo", "Orchard", "Distant", "Lantern", "Salt", "Crown",
];

const FIRST_NAMES: &[&str] = &[
    "Anna", "Boris", "Clara", "Dmitri", "Elena", "Felix", "Grace", "Hugo", "Irina", "Jonas",
    "Katya", "Leo", "Maria", "Nikolai", "Olga", "Pavel",
];

const LAST_NAMES: &[&str] = &[
    "Abbott", "Belova", "Carter", "Dorokhov", "Ellis", "Fedorova", "Graham", "Hale", "Ivanova",
    "Jensen", "Kuznetsov", "Lowell", "Morozova", "Novak", "Orlov", "Price",
];

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2023;

/// Fabricated book input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    /// Discarded by `Library::add`.
    pub status: BookStatus,
}

fn pick<'a, G: Rng + ?Sized>(rng: &mut G, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Generates `count` random books.
pub fn generate_books<G: Rng + ?Sized>(rng: &mut G, count: usize) -> Vec<SampleBook> {
    (0..count)
        .map(|_| {
            let title = (0..3)
                .map(|_| pick(rng, TITLE_WORDS))
                .collect::<Vec<_>>()
                .join(" ");
            let author = format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES));
            let status = if rng.gen_bool(0.5) {
                BookStatus::Available
            } else {
                BookStatus::CheckedOut
            };
            SampleBook {
                title,
                author,
                year: rng.gen_range(MIN_YEAR..=MAX_YEAR),
                status,
            }
        })
        .collect()
}

/// Adds `count` random books to `library`, returning their ids.
pub fn populate<S, R, G>(
    library: &mut Library<S, R>,
    rng: &mut G,
    count: usize,
) -> LibraryResult<Vec<BookId>>
where
    S: BookStorage,
    R: Reporter,
    G: Rng + ?Sized,
{
    generate_books(rng, count)
        .into_iter()
        .map(|sample| library.add(sample.title, sample.author, sample.year))
        .collect()
}
