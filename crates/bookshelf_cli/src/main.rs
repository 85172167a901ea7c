//! Bookshelf CLI entry point.
//!
//! # Responsibility
//! - Parse arguments, start logging, open the catalog.
//! - Dispatch to the interactive menu, `list` or `seed`.
//! - Treat Ctrl-C in the menu like end of input.

mod args;
mod interrupt;
mod menu;

use args::{Cli, Command};
use bookshelf_core::sample::populate;
use bookshelf_core::{init_logging, Library, LogReporter};
use clap::Parser;
use log::error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.logging_config()) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let mut library = Library::open(&cli.library_config(), LogReporter);

    let result = match cli.command() {
        Command::Menu => {
            interrupt::install();
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            menu::run_menu(&mut library, &mut input, &mut output).map_err(|err| err.to_string())
        }
        Command::List => {
            library.display();
            Ok(())
        }
        Command::Seed { count } => populate(&mut library, &mut rand::thread_rng(), count)
            .map(|_| {
                library.display();
            })
            .map_err(|err| err.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
