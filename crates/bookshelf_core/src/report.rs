//! Injected reporting sink for user-facing progress lines.
//!
//! # Responsibility
//! - Give the library store an explicit output capability instead of a
//!   process-wide logger.
//! - Provide a `log`-backed sink for the CLI and an in-memory sink for tests.
//!
//! # Invariants
//! - Reporting never fails and never panics.

use log::Level;
use std::cell::RefCell;

/// Log target used for user-facing catalog lines.
pub const REPORT_TARGET: &str = "bookshelf";

/// Receives human-readable result lines from catalog operations.
pub trait Reporter {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, level: Level, message: &str) {
        (**self).report(level, message);
    }
}

/// Forwards lines to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, level: Level, message: &str) {
        log::log!(target: REPORT_TARGET, level, "{message}");
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: RefCell<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected lines with their levels.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.lines.borrow().clone()
    }

    /// Returns collected message texts.
    pub fn messages(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Drains collected lines, returning message texts.
    pub fn take_messages(&self) -> Vec<String> {
        self.lines
            .borrow_mut()
            .drain(..)
            .map(|(_, message)| message)
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .borrow()
            .iter()
            .any(|(_, message)| message.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: Level, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryReporter, Reporter};
    use log::Level;

    #[test]
    fn memory_reporter_keeps_order_and_levels() {
        let reporter = MemoryReporter::new();
        reporter.info("first");
        reporter.warn("second");

        assert_eq!(
            reporter.entries(),
            vec![
                (Level::Info, "first".to_string()),
                (Level::Warn, "second".to_string())
            ]
        );
        assert_eq!(reporter.take_messages(), vec!["first", "second"]);
        assert!(reporter.messages().is_empty());
    }

    #[test]
    fn references_are_reporters() {
        fn emit<R: Reporter>(reporter: R) {
            reporter.info("via reference");
        }
        let reporter = MemoryReporter::new();
        emit(&reporter);
        assert!(reporter.contains("via reference"));
    }
}
