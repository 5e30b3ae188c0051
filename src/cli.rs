//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for reqtui using the `clap` crate.
//!
//! # Commands
//!
//! - **browse**: Interactive collection browser with tree and query filters
//! - **query**: Apply a jq-style expression to a JSON document
//! - **paths**: List suggestion candidates derived from a JSON document
//! - **complete**: Show the suggestions the query filter offers for some text
//! - **config**: Inspect the configuration
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use reqtui::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["reqtui", "q", ".users | length", "-i", "body.json"]);
//! assert!(matches!(cli.command, Commands::Query { .. }));
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "reqtui")]
#[command(about = "Browse saved HTTP request collections and filter responses", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this configuration file instead of the default one
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive collection browser
    #[command(visible_alias = "b")]
    Browse {
        /// Collection file (JSON, or TOML by extension)
        #[arg(value_name = "COLLECTION")]
        collection: PathBuf,
    },

    /// Apply a query expression to a JSON document
    #[command(visible_alias = "q")]
    Query {
        /// jq-style expression
        #[arg(value_name = "EXPRESSION")]
        expression: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// List query suggestion candidates for a JSON document
    Paths {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show query suggestions for partially typed text
    Complete {
        /// Text typed so far
        #[arg(value_name = "TEXT", default_value = "")]
        text: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// JSON document source
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Read the document from FILE instead of stdin
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration as TOML
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browse() {
        let cli = Cli::parse_from(["reqtui", "browse", "api.json"]);
        match cli.command {
            Commands::Browse { collection } => assert_eq!(collection, PathBuf::from("api.json")),
            other => panic!("Expected Browse command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_browse_alias() {
        let cli = Cli::parse_from(["reqtui", "b", "api.toml"]);
        assert!(matches!(cli.command, Commands::Browse { .. }));
    }

    #[test]
    fn test_parse_query_with_input() {
        let cli = Cli::parse_from(["reqtui", "query", ".a", "--input", "body.json"]);
        match cli.command {
            Commands::Query { expression, input } => {
                assert_eq!(expression, ".a");
                assert_eq!(input.file, Some(PathBuf::from("body.json")));
            }
            other => panic!("Expected Query command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_query_from_stdin() {
        let cli = Cli::parse_from(["reqtui", "q", "keys"]);
        match cli.command {
            Commands::Query { input, .. } => assert!(input.file.is_none()),
            other => panic!("Expected Query command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_complete_defaults_to_empty_text() {
        let cli = Cli::parse_from(["reqtui", "complete"]);
        match cli.command {
            Commands::Complete { text, .. } => assert_eq!(text, ""),
            other => panic!("Expected Complete command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["reqtui", "paths", "-vv", "-q", "--config", "/tmp/c.toml"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_parse_config_subcommands() {
        let cli = Cli::parse_from(["reqtui", "config", "show"]);
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Show)));
        let cli = Cli::parse_from(["reqtui", "config", "path"]);
        assert!(matches!(cli.command, Commands::Config(ConfigCommands::Path)));
    }

    #[test]
    fn test_browse_requires_collection() {
        assert!(Cli::try_parse_from(["reqtui", "browse"]).is_err());
    }
}
