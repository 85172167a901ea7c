//! CLI argument definitions using clap.
//!
//! Commands:
//! - bookshelf              (interactive menu)
//! - bookshelf list
//! - bookshelf seed --count <n>

use bookshelf_core::{default_log_level, LibraryConfig, LoggingConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf - a personal library catalog
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding library.json and deleted_books.json
    #[arg(long, env = "BOOKSHELF_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Catalog file with every book (overrides --data-dir)
    #[arg(long)]
    pub library_file: Option<PathBuf>,

    /// Catalog file with deleted books (overrides --data-dir)
    #[arg(long)]
    pub deleted_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Also write rotating log files to this directory
    #[arg(long, env = "BOOKSHELF_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the interactive menu (default)
    Menu,

    /// Print every active book and exit
    List,

    /// Add randomly generated books, then print the catalog
    Seed {
        /// Number of books to generate
        #[arg(long, short, default_value_t = 10)]
        count: usize,
    },
}

impl Cli {
    pub fn library_config(&self) -> LibraryConfig {
        let mut config = match &self.data_dir {
            Some(dir) => LibraryConfig::in_dir(dir),
            None => LibraryConfig::default(),
        };
        if let Some(path) = &self.library_file {
            config.library_file = path.clone();
        }
        if let Some(path) = &self.deleted_file {
            config.deleted_file = path.clone();
        }
        config
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            log_dir: self
                .log_dir
                .as_ref()
                .map(|dir| std::path::absolute(dir).unwrap_or_else(|_| dir.clone())),
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn defaults_to_menu_with_default_files() {
        let cli = Cli::try_parse_from(["bookshelf"]).unwrap();
        assert_eq!(cli.command(), Command::Menu);

        let config = cli.library_config();
        assert_eq!(config.library_file, Path::new("library.json"));
        assert_eq!(config.deleted_file, Path::new("deleted_books.json"));
    }

    #[test]
    fn explicit_files_override_data_dir() {
        let cli = Cli::try_parse_from([
            "bookshelf",
            "--data-dir",
            "/srv/books",
            "--deleted-file",
            "/tmp/trash.json",
            "seed",
            "--count",
            "3",
        ])
        .unwrap();

        let config = cli.library_config();
        assert_eq!(config.library_file, Path::new("/srv/books/library.json"));
        assert_eq!(config.deleted_file, Path::new("/tmp/trash.json"));
        assert_eq!(cli.command(), Command::Seed { count: 3 });
    }

    #[test]
    fn relative_log_dir_becomes_absolute() {
        let cli = Cli::try_parse_from(["bookshelf", "--log-dir", "logs", "list"]).unwrap();
        let logging = cli.logging_config();
        assert!(logging.log_dir.unwrap().is_absolute());
    }
}
