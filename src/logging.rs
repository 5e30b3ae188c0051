//! Tracing subscriber setup
//!
//! CLI subcommands log to stderr. The TUI owns the terminal, so it logs to a
//! file instead.

use crate::config::LogLevel;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, with colors
    Stderr,
    /// Append to a file, without colors
    File(PathBuf),
}

/// Level after applying `-v`/`-q` to the configured one
///
/// `-v` selects debug, `-vv` trace; `--quiet` limits output to errors.
#[must_use]
pub const fn effective_level(configured: LogLevel, verbose: u8, quiet: bool) -> Level {
    match (verbose, quiet) {
        (0, true) => Level::ERROR,
        (0, false) => configured.to_tracing_level(),
        (1, _) => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level`. Calling this twice keeps the
/// first subscriber.
///
/// # Errors
///
/// Returns an I/O error if the log file cannot be opened.
pub fn init(level: Level, target: &LogTarget) -> io::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if installed.is_ok() {
        tracing::debug!(?level, ?target, "logging initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level_uses_config_by_default() {
        assert_eq!(effective_level(LogLevel::Warn, 0, false), Level::WARN);
    }

    #[test]
    fn test_verbose_flags_raise_level() {
        assert_eq!(effective_level(LogLevel::Error, 1, false), Level::DEBUG);
        assert_eq!(effective_level(LogLevel::Error, 2, false), Level::TRACE);
        assert_eq!(effective_level(LogLevel::Error, 5, true), Level::TRACE);
    }

    #[test]
    fn test_quiet_limits_to_errors() {
        assert_eq!(effective_level(LogLevel::Debug, 0, true), Level::ERROR);
    }

    #[test]
    fn test_init_file_target_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("reqtui.log");
        init(Level::INFO, &LogTarget::File(path.clone())).unwrap();
        assert!(path.exists());
    }
}
