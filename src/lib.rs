//! reqtui - browse saved HTTP request collections from the terminal
//!
//! This library holds the filter and navigation engine behind the browser:
//! a flattened collection tree with expand/collapse visibility, a substring
//! tree filter that keeps ancestors, and a jq-style query filter over saved
//! response bodies with schema-derived suggestions.
//!
//! # Example
//!
//! ```
//! use reqtui::collection::{apply_filter, visible_indices, RequestStore};
//!
//! let json = r#"{
//!   "name": "demo",
//!   "folders": [{ "name": "Users", "requests": [{ "name": "List Users" }] }]
//! }"#;
//! let (nodes, store) = RequestStore::from_json_str(json).unwrap();
//! assert_eq!(store.len(), 1);
//!
//! let filtered = apply_filter(&nodes, "list");
//! let names: Vec<_> = visible_indices(&filtered)
//!     .into_iter()
//!     .map(|i| filtered[i].name.as_str())
//!     .collect();
//! assert_eq!(names, ["Users", "List Users"]);
//! ```

use thiserror::Error;

pub mod cli;
pub mod collection;
pub mod config;
pub mod logging;
pub mod query;
pub mod session;
pub mod text;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ReqtuiError {
    /// Collection could not be loaded
    #[error("Collection error: {0}")]
    StoreError(#[from] collection::StoreError),
    /// Query could not be applied
    #[error("Query error: {0}")]
    QueryError(#[from] query::QueryError),
    /// Terminal UI failure
    #[error("UI error: {0}")]
    UiError(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type using [`ReqtuiError`]
pub type Result<T> = std::result::Result<T, ReqtuiError>;
