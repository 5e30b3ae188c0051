//! Background query evaluation
//!
//! Evaluations run on a blocking thread of a small tokio runtime so the
//! event loop never waits on the evaluator. Results come back tagged with the
//! token of the request that produced them; the session decides whether they
//! are still current.

use super::error::Result;
use super::evaluator::{apply_query, QueryEvaluator};
use crate::session::ApplyRequest;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace};

/// Outcome of one dispatched evaluation
#[derive(Debug)]
pub struct QueryResult {
    /// Token of the originating request
    pub token: u64,
    /// Pretty-printed output or the failure
    pub result: Result<String>,
}

/// Runs query evaluations off the UI thread
pub struct QueryWorker {
    runtime: Runtime,
    evaluator: Arc<dyn QueryEvaluator>,
    tx: UnboundedSender<QueryResult>,
    rx: UnboundedReceiver<QueryResult>,
}

impl QueryWorker {
    /// Create a worker with its own runtime
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the runtime threads cannot be started.
    pub fn new(evaluator: Arc<dyn QueryEvaluator>) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("reqtui-query")
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            runtime,
            evaluator,
            tx,
            rx,
        })
    }

    /// Evaluate `request` in the background
    pub fn dispatch(&self, request: ApplyRequest) {
        let tx = self.tx.clone();
        let evaluator = Arc::clone(&self.evaluator);
        debug!(
            token = request.token,
            expression = %request.expression,
            evaluator = evaluator.name(),
            "dispatching query"
        );

        self.runtime.spawn_blocking(move || {
            let result = apply_query(evaluator.as_ref(), &request.expression, &request.body);
            if tx
                .send(QueryResult {
                    token: request.token,
                    result,
                })
                .is_err()
            {
                trace!(token = request.token, "query result dropped, receiver gone");
            }
        });
    }

    /// Next finished result, if any, without waiting
    pub fn try_next(&mut self) -> Option<QueryResult> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next finished result
    ///
    /// Must not be called from inside an async context.
    pub fn recv_blocking(&mut self) -> Option<QueryResult> {
        self.rx.blocking_recv()
    }

    /// Name of the evaluator in use
    #[must_use]
    pub fn evaluator_name(&self) -> &'static str {
        self.evaluator.name()
    }

    /// Stop the runtime without waiting for running evaluations
    pub fn shutdown(self) {
        self.runtime.shutdown_background();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{JaqEvaluator, QueryError};

    fn request(token: u64, expression: &str, body: &str) -> ApplyRequest {
        ApplyRequest {
            token,
            expression: expression.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_dispatch_delivers_tagged_result() {
        let mut worker = QueryWorker::new(Arc::new(JaqEvaluator)).unwrap();
        worker.dispatch(request(7, ".a", r#"{"a": 1}"#));

        let result = worker.recv_blocking().unwrap();
        assert_eq!(result.token, 7);
        assert_eq!(result.result.unwrap(), "1");
        worker.shutdown();
    }

    #[test]
    fn test_dispatch_reports_failures() {
        let mut worker = QueryWorker::new(Arc::new(JaqEvaluator)).unwrap();
        worker.dispatch(request(1, ".", "not json"));

        let result = worker.recv_blocking().unwrap();
        assert!(matches!(result.result, Err(QueryError::JsonDecode(_))));
    }

    #[test]
    fn test_try_next_is_empty_when_idle() {
        let mut worker = QueryWorker::new(Arc::new(JaqEvaluator)).unwrap();
        assert!(worker.try_next().is_none());
        assert_eq!(worker.evaluator_name(), "jaq");
    }
}
