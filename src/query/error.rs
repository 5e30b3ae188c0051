//! Query filter error types

use thiserror::Error;

/// Failures of a single query application
///
/// All variants are terminal for that application only: the session stays
/// usable and the message is shown in place of the previous output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The expression is malformed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The evaluator failed while running a well-formed expression
    #[error("Evaluation error: {0}")]
    Eval(String),

    /// The response body is not valid JSON
    #[error("Response body is not valid JSON: {0}")]
    JsonDecode(String),
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonDecode(err.to_string())
    }
}

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
