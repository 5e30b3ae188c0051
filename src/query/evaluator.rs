//! jq-compatible expression evaluation
//!
//! Two implementations of [`QueryEvaluator`] are provided: [`JaqEvaluator`]
//! runs in-process, [`JqCommandEvaluator`] shells out to a `jq` binary.

use super::error::{QueryError, Result};
use crate::config::{EvaluatorKind, QueryConfig};
use jaq_core::load::{Arena, File, Loader};
use jaq_core::{Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;
use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// jq exits with this status when the program does not compile
const JQ_COMPILE_ERROR_STATUS: i32 = 3;

/// Evaluates a query expression against a JSON value
pub trait QueryEvaluator: Send + Sync {
    /// Produce every output of `expression` for `input`
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Parse` for malformed expressions and
    /// `QueryError::Eval` for failures while running them.
    fn evaluate(&self, expression: &str, input: &Value) -> Result<Vec<Value>>;

    /// Short name for logs and the status bar
    fn name(&self) -> &'static str;
}

/// Build the evaluator selected in configuration
#[must_use]
pub fn from_config(config: &QueryConfig) -> Arc<dyn QueryEvaluator> {
    match config.evaluator {
        EvaluatorKind::Builtin => Arc::new(JaqEvaluator),
        EvaluatorKind::Command => Arc::new(JqCommandEvaluator::new(
            config.jq_command.clone(),
            Duration::from_millis(config.timeout_ms),
        )),
    }
}

fn normalize(expression: &str) -> &str {
    let trimmed = expression.trim();
    if trimmed.is_empty() { "." } else { trimmed }
}

/// In-process evaluator backed by jaq
#[derive(Debug, Clone, Copy, Default)]
pub struct JaqEvaluator;

impl QueryEvaluator for JaqEvaluator {
    fn evaluate(&self, expression: &str, input: &Value) -> Result<Vec<Value>> {
        let code = normalize(expression);
        let program = File { code, path: () };

        let loader = Loader::new(jaq_std::defs().chain(jaq_json::defs()));
        let arena = Arena::default();

        let modules = loader.load(&arena, program).map_err(|errs| {
            let messages: Vec<String> = errs
                .into_iter()
                .flat_map(|(_, err)| match err {
                    jaq_core::load::Error::Io(errs) => {
                        vec![format!("cannot load {} module(s)", errs.len())]
                    }
                    jaq_core::load::Error::Lex(errs) => errs
                        .into_iter()
                        .map(|(expected, found)| {
                            format!("expected {} near '{}'", expected.as_str(), snippet(found))
                        })
                        .collect(),
                    jaq_core::load::Error::Parse(errs) => errs
                        .into_iter()
                        .map(|(expected, _)| format!("expected {}", expected.as_str()))
                        .collect(),
                })
                .collect();
            QueryError::Parse(messages.join("; "))
        })?;

        let filter = Compiler::default()
            .with_funs(jaq_std::funs().chain(jaq_json::funs()))
            .compile(modules)
            .map_err(|errs| {
                let messages: Vec<String> = errs
                    .into_iter()
                    .flat_map(|(_, undefined)| undefined)
                    .map(|(name, _)| format!("undefined symbol '{name}'"))
                    .collect();
                QueryError::Parse(messages.join("; "))
            })?;

        let inputs = RcIter::new(core::iter::empty());
        let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

        outputs
            .map(|output| {
                output
                    .map(Value::from)
                    .map_err(|err| QueryError::Eval(err.to_string()))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "jaq"
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(12).collect()
}

/// Evaluator that runs an external `jq` process
#[derive(Debug, Clone)]
pub struct JqCommandEvaluator {
    program: String,
    timeout: Duration,
}

impl JqCommandEvaluator {
    /// Create an evaluator running `program` with the given timeout
    #[must_use]
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn run(&self, expression: &str, input: &str) -> std::io::Result<(ExitStatus, String, String)> {
        let stdout_file = NamedTempFile::new()?;
        let stderr_file = NamedTempFile::new()?;

        let mut child = Command::new(&self.program)
            .arg("-c")
            .arg("--")
            .arg(expression)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(stdout_file.reopen()?))
            .stderr(Stdio::from(stderr_file.reopen()?))
            .spawn()?;

        // jq closes stdin early when the program fails to compile
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(input.as_bytes()) {
                if err.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(err);
                }
            }
        }

        let start = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if start.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("jq did not finish within {}ms", self.timeout.as_millis()),
                ));
            }
            std::thread::sleep(Duration::from_millis(10));
        };

        let mut stdout = String::new();
        stdout_file.reopen()?.read_to_string(&mut stdout)?;
        let mut stderr = String::new();
        stderr_file.reopen()?.read_to_string(&mut stderr)?;

        Ok((status, stdout, stderr))
    }
}

impl QueryEvaluator for JqCommandEvaluator {
    fn evaluate(&self, expression: &str, input: &Value) -> Result<Vec<Value>> {
        let document = serde_json::to_string(input)?;

        let (status, stdout, stderr) = self
            .run(normalize(expression), &document)
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => {
                    QueryError::Eval(format!("'{}' executable not found", self.program))
                }
                _ => QueryError::Eval(err.to_string()),
            })?;

        if !status.success() {
            let message = stderr.trim().to_string();
            warn!(status = ?status.code(), "jq exited with failure");
            return Err(if status.code() == Some(JQ_COMPILE_ERROR_STATUS) {
                QueryError::Parse(message)
            } else {
                QueryError::Eval(message)
            });
        }

        stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .map_err(|err| QueryError::Eval(format!("unreadable jq output: {err}")))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "jq"
    }
}

/// Shape evaluator outputs into a single value
///
/// No output becomes `null`, one output is returned as is, several outputs
/// are wrapped in an array.
#[must_use]
pub fn collapse_results(mut results: Vec<Value>) -> Value {
    match results.len() {
        0 => Value::Null,
        1 => results.swap_remove(0),
        _ => Value::Array(results),
    }
}

/// Parse `body`, evaluate `expression` and pretty-print the collapsed result
///
/// # Errors
///
/// Returns `QueryError::JsonDecode` if `body` is not JSON, otherwise whatever
/// the evaluator reports.
pub fn apply_query(evaluator: &dyn QueryEvaluator, expression: &str, body: &str) -> Result<String> {
    let input: Value = serde_json::from_str(body)?;
    let results = evaluator.evaluate(expression, &input)?;
    debug!(
        evaluator = evaluator.name(),
        expression,
        outputs = results.len(),
        "evaluated query"
    );
    Ok(serde_json::to_string_pretty(&collapse_results(results))?)
}
