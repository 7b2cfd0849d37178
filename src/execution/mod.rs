//! Execution engine: request/result types, outcome classification and the
//! query evaluation pipeline.

use std::time::Duration;

use serde::Serialize;

use crate::{balance, process::BoundedProcessRunner};

pub mod python;

/// Error text reported when the interpreter exceeds its time budget.
pub const TIMEOUT_MESSAGE: &str = "process timed out and was terminated";

/// One snippet plus the wall-clock budget it may use.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    snippet: String,
    timeout: Duration,
}

impl ExecutionRequest {
    pub fn new(snippet: impl Into<String>, timeout: Duration) -> Self {
        Self {
            snippet: snippet.into(),
            timeout,
        }
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Captured result of a single interpreter run.
///
/// `timed_out` implies `exit_code == -1` and an empty `output`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    output: String,
    error: String,
    exit_code: i32,
    timed_out: bool,
}

impl ExecutionResult {
    pub(crate) fn completed(output: String, error: String, exit_code: i32) -> Self {
        Self {
            output,
            error,
            exit_code,
            timed_out: false,
        }
    }

    pub(crate) fn timeout_result() -> Self {
        Self {
            output: String::new(),
            error: TIMEOUT_MESSAGE.to_string(),
            exit_code: -1,
            timed_out: true,
        }
    }

    pub(crate) fn launch_failed(message: String) -> Self {
        Self {
            output: String::new(),
            error: message,
            exit_code: -1,
            timed_out: false,
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }
}

/// What the host should show for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Brackets or quotes are still open; nothing was executed.
    Incomplete,
    TimedOut,
    /// Launch or runtime failure. `message` is the full, unclipped error text.
    Failed { message: String, exit_code: i32 },
    Output(String),
    NoOutput,
}

impl Outcome {
    pub fn from_result(result: &ExecutionResult) -> Self {
        if result.timed_out {
            return Self::TimedOut;
        }
        if result.exit_code != 0 || !result.error.trim().is_empty() {
            let message = if result.error.trim().is_empty() {
                format!("exit code: {}", result.exit_code)
            } else {
                result.error.clone()
            };
            return Self::Failed {
                message,
                exit_code: result.exit_code,
            };
        }
        if result.output.trim().is_empty() {
            Self::NoOutput
        } else {
            Self::Output(result.output.clone())
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Output(_) | Self::NoOutput)
    }
}

/// Result of pushing one query through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation {
    Incomplete,
    Executed(ExecutionResult),
}

impl Evaluation {
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Incomplete => Outcome::Incomplete,
            Self::Executed(result) => Outcome::from_result(result),
        }
    }
}

/// Balance-check `query` and, once it is complete, run it in a fresh interpreter.
pub async fn evaluate(runner: &BoundedProcessRunner, query: &str, timeout: Duration) -> Evaluation {
    if !balance::is_complete(query) {
        tracing::debug!("query not balanced yet; skipping execution");
        return Evaluation::Incomplete;
    }
    let request = ExecutionRequest::new(query, timeout);
    Evaluation::Executed(runner.run(&request).await)
}
