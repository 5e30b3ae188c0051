//! Collection loading error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a collection file
#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection file could not be read
    #[error("Failed to read collection {path}: {source}")]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON collection could not be parsed
    #[error("Invalid JSON collection: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML collection could not be parsed
    #[error("Invalid TOML collection: {0}")]
    Toml(#[from] toml::de::Error),

    /// A request entry is unusable
    #[error("Invalid request '{name}': {reason}")]
    InvalidRequest {
        /// Request name
        name: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for collection loading
pub type Result<T> = std::result::Result<T, StoreError>;
