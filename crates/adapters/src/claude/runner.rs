// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claude CLI process runner
//!
//! Launches one child per invocation and drains stdout and stderr on two
//! independent tasks, so a full pipe on one stream can never stall the
//! other. The caller waits for the child to exit and both readers to reach
//! end-of-stream, bounded by a wall-clock deadline.
//!
//! On timeout the child is killed with SIGKILL, the readers get a short
//! grace period to hand back what they buffered, and a
//! [`ClaudeError::Timeout`] carrying that partial output is returned.

use super::{ClaudeError, ClaudeObserver};
use mp_core::Truncate;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::Instant;

/// Bytes of stdout/stderr kept in timeout and exit diagnostics.
pub const DIAGNOSTIC_LEN: usize = 500;

/// A fully-built CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Complete child environment; the parent's is not inherited.
    pub env: Vec<(String, String)>,
}

/// Output of a child that exited before the deadline.
#[derive(Debug)]
pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: Vec<String>,
}

impl RunOutput {
    /// Stderr lines joined back into text.
    pub fn stderr_text(&self) -> String {
        self.stderr.join("\n")
    }
}

type ReaderTask = JoinHandle<std::io::Result<()>>;

/// Output collected by the reader tasks.
///
/// Readers append as data arrives, so whatever they buffered stays
/// readable after the tasks finish or are aborted.
#[derive(Clone, Default)]
struct Captured {
    stdout: Arc<Mutex<Vec<u8>>>,
    stderr: Arc<Mutex<Vec<String>>>,
}

impl Captured {
    fn take(&self) -> (String, Vec<String>) {
        let stdout = std::mem::take(&mut *self.stdout.lock());
        let stderr = std::mem::take(&mut *self.stderr.lock());
        (String::from_utf8_lossy(&stdout).into_owned(), stderr)
    }
}

/// Run `invocation` to completion or until `timeout` elapses.
///
/// Returns `Ok` for any exit status; interpreting the status is up to the
/// caller. On every path the child has been reaped and both reader tasks
/// have finished or been aborted before this returns.
pub async fn run_invocation<O: ClaudeObserver>(
    invocation: &Invocation,
    timeout: Duration,
    grace: Duration,
    observer: &O,
) -> Result<RunOutput, ClaudeError> {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .env_clear()
        .envs(invocation.env.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let started = Instant::now();
    let deadline = started + timeout;
    let mut child = cmd.spawn().map_err(|source| ClaudeError::Spawn {
        program: invocation.program.display().to_string(),
        source,
    })?;

    let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
        (Some(stdout), Some(stderr)) => (stdout, stderr),
        _ => {
            reap(&mut child).await;
            return Err(ClaudeError::Io(std::io::Error::other(
                "child output streams were not piped",
            )));
        }
    };

    let captured = Captured::default();
    let stdout_task: ReaderTask = tokio::spawn(read_stdout(stdout, captured.stdout.clone()));
    let stderr_task: ReaderTask = tokio::spawn(read_stderr(
        stderr,
        captured.stderr.clone(),
        observer.clone(),
    ));
    let aborts = [stdout_task.abort_handle(), stderr_task.abort_handle()];

    let readers = join_readers(stdout_task, stderr_task);
    tokio::pin!(readers);

    let finished = tokio::time::timeout_at(deadline, async {
        let status = child.wait().await;
        if status.is_err() {
            abort_all(&aborts);
        }
        let drained = (&mut readers).await;
        (status, drained)
    })
    .await;

    match finished {
        Ok((status, drained)) => {
            let status = status?;
            drained?;
            let (stdout, stderr) = captured.take();
            observer.exited(status.code(), started.elapsed());
            Ok(RunOutput {
                status,
                stdout,
                stderr,
            })
        }
        Err(_elapsed) => {
            // The child may already have exited with a reader still held
            // open by a grandchild; reap covers both cases.
            reap(&mut child).await;

            match tokio::time::timeout(grace, &mut readers).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::debug!(error = %e, "reader failed after timeout"),
                Err(_) => {
                    abort_all(&aborts);
                    // Cancelled readers finish promptly; their buffers stay in `captured`
                    let _ = (&mut readers).await;
                }
            }
            let (stdout, stderr) = captured.take();

            let stdout = stdout.head(DIAGNOSTIC_LEN).to_string();
            let stderr = stderr.join("\n").head(DIAGNOSTIC_LEN).to_string();
            observer.timed_out(timeout, &stdout, &stderr);
            Err(ClaudeError::Timeout {
                timeout,
                stdout,
                stderr,
            })
        }
    }
}

/// Kill the child if it is still running and wait for it to be reaped.
async fn reap(child: &mut Child) {
    if let Ok(Some(_)) = child.try_wait() {
        return;
    }
    if let Err(e) = child.kill().await {
        tracing::warn!(error = %e, "failed to kill claude cli");
    }
}

/// Cancel reader tasks; anything they buffered stays in [`Captured`].
fn abort_all(aborts: &[AbortHandle]) {
    for abort in aborts {
        abort.abort();
    }
}

/// Wait for both readers to reach end-of-stream.
async fn join_readers(stdout: ReaderTask, stderr: ReaderTask) -> Result<(), ClaudeError> {
    let (stdout, stderr) = tokio::join!(stdout, stderr);
    stdout.map_err(join_error)??;
    stderr.map_err(join_error)??;
    Ok(())
}

fn join_error(e: tokio::task::JoinError) -> ClaudeError {
    ClaudeError::Io(std::io::Error::other(format!("output reader failed: {e}")))
}

/// Accumulate raw stdout. The payload need not be newline-delimited.
async fn read_stdout<R: AsyncRead + Unpin>(
    mut stream: R,
    sink: Arc<Mutex<Vec<u8>>>,
) -> std::io::Result<()> {
    let mut chunk = [0u8; 8192];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        sink.lock().extend_from_slice(&chunk[..n]);
    }
}

/// Split stderr into lines, reporting each as it arrives.
async fn read_stderr<R, O>(
    stream: R,
    sink: Arc<Mutex<Vec<String>>>,
    observer: O,
) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    O: ClaudeObserver,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']).to_string();
        observer.stderr_line(&line);
        sink.lock().push(line);
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
