//! reqtui CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Browse a collection interactively
//! reqtui browse api.json
//! reqtui b api.toml
//!
//! # Apply a query to a JSON document
//! curl -s https://api.test/users | reqtui q '.users | map(.name)'
//! reqtui query '.total' -i body.json
//!
//! # Inspect query suggestions for a document
//! reqtui paths -i body.json
//! reqtui complete '.users[].' -i body.json
//!
//! # Configuration
//! reqtui config path
//! reqtui config show
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory
//! (`~/.config/reqtui/config.toml` on Linux) and are created with defaults on
//! first run.

use reqtui::{
    cli::{Cli, Commands, ConfigCommands, InputArgs},
    collection::RequestStore,
    config::AppConfig,
    logging::{self, LogTarget},
    query::{self, QueryError, QueryWorker},
    ui::{App, OutputWriter, StdoutWriter},
    ReqtuiError,
};
use serde_json::Value;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::process;

type Result<T> = std::result::Result<T, ReqtuiError>;

/// Load the file given by `--config`, or the default one
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

/// Where logs go for `command`
///
/// The browser owns the terminal, so it logs to a file or not at all.
fn log_target(command: &Commands, config: &AppConfig) -> Option<LogTarget> {
    match command {
        Commands::Browse { .. } => config.logging.file_path().map(LogTarget::File),
        _ => Some(LogTarget::Stderr),
    }
}

/// Read the JSON document from `--input` or stdin
fn read_input(input: &InputArgs) -> Result<String> {
    match &input.file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn parse_document(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| QueryError::from(e).into())
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    if let Some(target) = log_target(&cli.command, &config) {
        let level = logging::effective_level(config.logging.level, cli.verbose, cli.quiet);
        logging::init(level, &target)?;
    }

    let output = StdoutWriter::quiet(cli.quiet);

    match cli.command {
        Commands::Browse { collection } => {
            let (nodes, store) = RequestStore::load(&collection)?;
            if store.is_empty() {
                output.warning(&format!("Collection '{}' has no requests", store.name()));
            }
            let worker = QueryWorker::new(query::from_config(&config.query))?;
            App::new(&config.ui)?.run(nodes, store, worker)?;
        }
        Commands::Query { expression, input } => {
            let body = read_input(&input)?;
            let evaluator = query::from_config(&config.query);
            let result = query::apply_query(evaluator.as_ref(), &expression, &body)?;
            output.write(&result);
        }
        Commands::Paths { input } => {
            let document = parse_document(&read_input(&input)?)?;
            for candidate in query::suggestion_candidates(Some(&document)) {
                output.write(&candidate);
            }
        }
        Commands::Complete { text, input } => {
            let document = if input.file.is_some() || !io::stdin().is_terminal() {
                Some(parse_document(&read_input(&input)?)?)
            } else {
                output.info("No document given; showing static suggestions");
                None
            };
            for suggestion in query::suggest(&text, document.as_ref()) {
                output.write(&suggestion);
            }
        }
        Commands::Config(command) => match command {
            ConfigCommands::Path => {
                let path = match &cli.config {
                    Some(path) => path.clone(),
                    None => AppConfig::config_path()?,
                };
                output.write(&path.display().to_string());
            }
            ConfigCommands::Show => output.write(config.to_toml()?.trim_end()),
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = run(cli) {
        StdoutWriter::new().error(&e.to_string());
        process::exit(1);
    }
}
