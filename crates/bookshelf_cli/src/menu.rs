//! Interactive numbered menu over a library.
//!
//! # Invariants
//! - Each menu choice calls at most one library operation.
//! - Bad user input is reported and aborts only the current choice.
//! - End of input ends the loop normally.

use bookshelf_core::{BookId, BookStorage, Library, LibraryError, Reporter, SearchCriterion};
use log::Level;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\nMenu:\n\
1. Add book\n\
2. Remove book\n\
3. Search books\n\
4. List books\n\
5. Change book status\n\
6. Exit\n";

enum Flow {
    Continue,
    Exit,
}

/// Runs the menu until the user exits or input ends.
///
/// # Errors
/// Returns terminal I/O errors; library failures are reported and the loop
/// continues.
pub fn run_menu<S, R, I, O>(
    library: &mut Library<S, R>,
    input: &mut I,
    output: &mut O,
) -> io::Result<()>
where
    S: BookStorage,
    R: Reporter,
    I: BufRead,
    O: Write,
{
    loop {
        output.write_all(MENU.as_bytes())?;
        let Some(choice) = prompt(input, output, "Choose an action: ")? else {
            return say_goodbye(library);
        };

        let flow = match choice.trim() {
            "1" => add_book(library, input, output)?,
            "2" => remove_book(library, input, output)?,
            "3" => search_books(library, input, output)?,
            "4" => {
                library.display();
                Some(Flow::Continue)
            }
            "5" => change_status(library, input, output)?,
            "6" => {
                library.reporter().info("Exiting.");
                Some(Flow::Exit)
            }
            _ => {
                library
                    .reporter()
                    .info("Invalid choice. Please try again.");
                Some(Flow::Continue)
            }
        };

        match flow {
            Some(Flow::Continue) => {}
            Some(Flow::Exit) => return Ok(()),
            None => return say_goodbye(library),
        }
    }
}

fn say_goodbye<S: BookStorage, R: Reporter>(library: &Library<S, R>) -> io::Result<()> {
    library.reporter().info("Goodbye!");
    Ok(())
}

/// `Ok(None)` means input ended.
fn prompt<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

fn parse_or_report<T: FromStr, R: Reporter>(reporter: &R, value: &str) -> Option<T> {
    let parsed = value.trim().parse::<T>().ok();
    if parsed.is_none() {
        reporter.warn("Invalid input.");
    }
    parsed
}

fn report_failure<R: Reporter>(reporter: &R, err: &LibraryError) {
    match err {
        LibraryError::Validation(err) => reporter.warn(&format!("Book not added: {err}.")),
        LibraryError::Repo(err) => reporter.report(Level::Error, &format!("Save failed: {err}")),
    }
}

fn add_book<S, R, I, O>(
    library: &mut Library<S, R>,
    input: &mut I,
    output: &mut O,
) -> io::Result<Option<Flow>>
where
    S: BookStorage,
    R: Reporter,
    I: BufRead,
    O: Write,
{
    let Some(title) = prompt(input, output, "Enter the book title: ")? else {
        return Ok(None);
    };
    let Some(author) = prompt(input, output, "Enter the book author: ")? else {
        return Ok(None);
    };
    let Some(year) = prompt(input, output, "Enter the publication year: ")? else {
        return Ok(None);
    };
    let Some(year) = parse_or_report::<i32, _>(library.reporter(), &year) else {
        return Ok(Some(Flow::Continue));
    };

    if let Err(err) = library.add(title.trim(), author.trim(), year) {
        report_failure(library.reporter(), &err);
    }
    Ok(Some(Flow::Continue))
}

fn remove_book<S, R, I, O>(
    library: &mut Library<S, R>,
    input: &mut I,
    output: &mut O,
) -> io::Result<Option<Flow>>
where
    S: BookStorage,
    R: Reporter,
    I: BufRead,
    O: Write,
{
    let Some(id) = prompt(input, output, "Enter the id of the book to remove: ")? else {
        return Ok(None);
    };
    let Some(id) = parse_or_report::<BookId, _>(library.reporter(), &id) else {
        return Ok(Some(Flow::Continue));
    };

    if let Err(err) = library.remove(id) {
        report_failure(library.reporter(), &err);
    }
    Ok(Some(Flow::Continue))
}

fn search_books<S, R, I, O>(
    library: &Library<S, R>,
    input: &mut I,
    output: &mut O,
) -> io::Result<Option<Flow>>
where
    S: BookStorage,
    R: Reporter,
    I: BufRead,
    O: Write,
{
    let Some(field) = prompt(input, output, "Search by (title/author/year/status): ")? else {
        return Ok(None);
    };
    let Some(value) = prompt(input, output, "Enter the search value: ")? else {
        return Ok(None);
    };

    let criterion = match SearchCriterion::from_input(&field, &value) {
        Ok(criterion) => criterion,
        Err(err) => {
            library.reporter().warn(&format!("Invalid search: {err}."));
            return Ok(Some(Flow::Continue));
        }
    };

    let results = library.search(&[criterion]);
    if results.is_empty() {
        library.reporter().info("No books found.");
    }
    for book in results {
        library.reporter().info(&book.to_string());
    }
    Ok(Some(Flow::Continue))
}

fn change_status<S, R, I, O>(
    library: &mut Library<S, R>,
    input: &mut I,
    output: &mut O,
) -> io::Result<Option<Flow>>
where
    S: BookStorage,
    R: Reporter,
    I: BufRead,
    O: Write,
{
    let Some(id) = prompt(input, output, "Enter the book id: ")? else {
        return Ok(None);
    };
    let Some(id) = parse_or_report::<BookId, _>(library.reporter(), &id) else {
        return Ok(Some(Flow::Continue));
    };
    let Some(status) = prompt(
        input,
        output,
        "Enter the new status (available/checked_out): ",
    )?
    else {
        return Ok(None);
    };

    if let Err(err) = library.change_status(id, &status) {
        report_failure(library.reporter(), &err);
    }
    Ok(Some(Flow::Continue))
}
