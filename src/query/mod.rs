//! Query filtering over JSON response bodies
//!
//! Suggestion sources ([`schema`], [`completion`]), expression evaluation
//! ([`evaluator`]) and background dispatch ([`worker`]).

pub mod completion;
pub mod error;
pub mod evaluator;
pub mod schema;
pub mod worker;

pub use completion::{complete, filter_candidates, resolve_path, suggest};
pub use error::QueryError;
pub use evaluator::{
    apply_query, collapse_results, from_config, JaqEvaluator, JqCommandEvaluator, QueryEvaluator,
};
pub use schema::{extract_paths, suggestion_candidates, STATIC_SUGGESTIONS};
pub use worker::{QueryResult, QueryWorker};
