//! Output formatting utilities

use console::{style, Style};

use pkgscope_core::{StepLogger, TracingLogger};

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Style for commit hashes
pub fn hash_style() -> Style {
    Style::new().yellow()
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Host logger for pipeline steps: prints progress lines to stderr and
/// records them in the trace log
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    quiet: bool,
}

impl ConsoleLogger {
    /// Create a logger; `quiet` suppresses console output
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl StepLogger for ConsoleLogger {
    fn log(&self, message: &str) {
        TracingLogger.log(message);
        if !self.quiet {
            info(message);
        }
    }
}
