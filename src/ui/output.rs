//! Output abstraction layer
//!
//! Subcommands print through [`OutputWriter`]; the TUI shows the same
//! [`MessageLevel`]s in its status bar.

use colored::Colorize;

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Normal message
    Normal,
    /// Error message
    Error,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Info message
    Info,
}

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use reqtui::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("{\"id\": 1}");
/// output.error("Failed to parse query");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message (command results)
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Write `message` at `level`
    fn emit(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Normal => self.write(message),
            MessageLevel::Error => self.error(message),
            MessageLevel::Success => self.success(message),
            MessageLevel::Warning => self.warning(message),
            MessageLevel::Info => self.info(message),
        }
    }
}

/// CLI implementation - writes to stdout/stderr
///
/// Results go to stdout; diagnostics go to stderr so piped output stays
/// clean. Quiet mode drops everything but results and errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new() -> Self {
        Self { quiet: false }
    }

    /// Create a writer that suppresses success, warning and info lines
    #[must_use]
    pub const fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Whether `level` is printed
    #[must_use]
    pub const fn shows(&self, level: MessageLevel) -> bool {
        !self.quiet || matches!(level, MessageLevel::Normal | MessageLevel::Error)
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        if self.shows(MessageLevel::Success) {
            eprintln!("{} {}", "✓".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        if self.shows(MessageLevel::Warning) {
            eprintln!("{} {}", "⚠️".yellow(), message);
        }
    }

    fn info(&self, message: &str) {
        if self.shows(MessageLevel::Info) {
            eprintln!("{}", message.dimmed());
        }
    }
}
