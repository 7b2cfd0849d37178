//! Bounded interpreter process execution.
//!
//! Each run owns exactly one child process and two reader tasks. The child
//! is reaped and both readers are finished or aborted before a result is
//! returned, whatever the outcome.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    task::JoinHandle,
};
use tracing::{debug, warn};

use crate::execution::{ExecutionRequest, ExecutionResult};

pub mod python;

/// How long to wait for buffered output after the child has exited.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct BoundedProcessRunner {
    interpreter: PathBuf,
    drain_grace: Duration,
}

impl Default for BoundedProcessRunner {
    fn default() -> Self {
        Self::new(python::default_interpreter())
    }
}

impl BoundedProcessRunner {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            drain_grace: DEFAULT_DRAIN_GRACE,
        }
    }

    pub fn with_drain_grace(mut self, drain_grace: Duration) -> Self {
        self.drain_grace = drain_grace;
        self
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Run `snippet` with a hard wall-clock `timeout`.
    pub async fn execute(&self, snippet: &str, timeout: Duration) -> ExecutionResult {
        self.run(&ExecutionRequest::new(snippet, timeout)).await
    }

    /// Run one request. Never returns an error: launch failures, runtime
    /// failures and timeouts are all encoded in the [`ExecutionResult`].
    pub async fn run(&self, request: &ExecutionRequest) -> ExecutionResult {
        let mut cmd = python::command(&self.interpreter, request.snippet());
        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(interpreter = %self.interpreter.display(), error = %e, "failed to launch interpreter");
                return ExecutionResult::launch_failed(format!(
                    "failed to launch {}: {e}",
                    self.interpreter.display()
                ));
            }
        };
        debug!(pid = ?child.id(), timeout = ?request.timeout(), "interpreter started");

        let stdout = LineBuffer::default();
        let stderr = LineBuffer::default();
        let mut readers = Vec::with_capacity(2);
        if let Some(pipe) = child.stdout.take() {
            readers.push(spawn_reader(pipe, stdout.clone()));
        }
        if let Some(pipe) = child.stderr.take() {
            readers.push(spawn_reader(pipe, stderr.clone()));
        }

        match tokio::time::timeout(request.timeout(), child.wait()).await {
            Ok(Ok(status)) => {
                self.drain(&mut readers).await;
                let exit_code = status.code().unwrap_or(-1);
                debug!(exit_code, "interpreter exited");
                ExecutionResult::completed(stdout.take(), stderr.take(), exit_code)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "failed to wait for interpreter");
                if let Err(e) = child.kill().await {
                    debug!(error = %e, "kill after wait failure failed");
                }
                self.drain(&mut readers).await;
                let mut error = stderr.take();
                error.push_str(&format!("failed to wait for interpreter: {e}\n"));
                ExecutionResult::completed(stdout.take(), error, -1)
            }
            Err(_) => {
                warn!(timeout = ?request.timeout(), "interpreter timed out; killing");
                // The child may have exited on its own in the meantime.
                if let Err(e) = child.kill().await {
                    debug!(error = %e, "kill after timeout failed");
                }
                self.drain(&mut readers).await;
                ExecutionResult::timeout_result()
            }
        }
    }

    /// Join the readers, aborting any still blocked after the grace period
    /// (e.g. a grandchild holding the pipe open).
    async fn drain(&self, readers: &mut [JoinHandle<()>]) {
        let joined = tokio::time::timeout(self.drain_grace, async {
            for reader in readers.iter_mut() {
                let _ = reader.await;
            }
        })
        .await;

        if joined.is_err() {
            debug!("output still open after drain grace; abandoning readers");
            for reader in readers.iter() {
                reader.abort();
            }
        }
    }
}

/// Append-only text buffer shared between a reader task and the runner.
#[derive(Debug, Clone, Default)]
struct LineBuffer(Arc<Mutex<String>>);

impl LineBuffer {
    fn push_line(&self, line: &str) {
        let mut buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        buf.push_str(line);
        buf.push('\n');
    }

    fn take(&self) -> String {
        let mut buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *buf)
    }
}

fn spawn_reader<R>(pipe: R, sink: LineBuffer) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(pipe);
        let mut line = Vec::new();
        loop {
            line.clear();
            match reader.read_until(b'\n', &mut line).await {
                Ok(0) => break,
                Ok(_) => sink.push_line(&String::from_utf8_lossy(strip_line_ending(&line))),
                Err(e) => {
                    debug!(error = %e, "output reader stopped");
                    break;
                }
            }
        }
    })
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_line_ending_handles_lf_and_crlf() {
        assert_eq!(strip_line_ending(b"abc\n"), b"abc");
        assert_eq!(strip_line_ending(b"abc\r\n"), b"abc");
        assert_eq!(strip_line_ending(b"abc"), b"abc");
        assert_eq!(strip_line_ending(b"\n"), b"");
    }

    #[test]
    fn line_buffer_appends_and_takes() {
        let buf = LineBuffer::default();
        buf.push_line("one");
        buf.clone().push_line("two");
        assert_eq!(buf.take(), "one\ntwo\n");
        assert_eq!(buf.take(), "");
    }

    #[tokio::test]
    async fn reader_collects_every_line() {
        let data: &[u8] = b"first\r\nsecond\nno newline";
        let buf = LineBuffer::default();
        spawn_reader(data, buf.clone()).await.unwrap();
        assert_eq!(buf.take(), "first\nsecond\nno newline\n");
    }

    #[tokio::test]
    async fn reader_decodes_invalid_utf8_lossily() {
        let data: &[u8] = b"ok \xff\n";
        let buf = LineBuffer::default();
        spawn_reader(data, buf.clone()).await.unwrap();
        assert_eq!(buf.take(), "ok \u{FFFD}\n");
    }

    #[tokio::test]
    async fn missing_interpreter_is_a_launch_failure() {
        let runner = BoundedProcessRunner::new("/nonexistent/pyrun-test-interpreter");
        let result = runner.execute("1 + 1", Duration::from_secs(1)).await;
        assert!(!result.timed_out());
        assert_eq!(result.exit_code(), -1);
        assert!(result.output().is_empty());
        assert!(result.error().contains("failed to launch"));
    }
}
