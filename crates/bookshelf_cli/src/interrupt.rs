//! Ctrl-C handling for the interactive menu.
//!
//! # Invariants
//! - An interrupt ends the process with `Goodbye!` and exit code 0.
//! - Every mutation is already persisted when it returns, so exiting
//!   between prompts loses nothing.

use bookshelf_core::{LogReporter, Reporter};
use log::warn;

/// Reports the farewell line and returns the exit code for an interrupt.
pub fn farewell<R: Reporter>(reporter: &R) -> i32 {
    reporter.info("Goodbye!");
    0
}

/// Installs the process-wide Ctrl-C handler.
///
/// Failure to install is logged and leaves the platform default in place.
pub fn install() {
    let result = ctrlc::set_handler(|| {
        let code = farewell(&LogReporter);
        log::logger().flush();
        std::process::exit(code);
    });
    if let Err(err) = result {
        warn!("event=interrupt_handler module=cli status=error error={err}");
    }
}
