// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Default timeout for handing a message to the local mail transfer agent.
pub const SENDMAIL_TIMEOUT: Duration = Duration::from_secs(30);

/// Run a subprocess with `input` on stdin, bounded by a timeout.
///
/// Stdin is written concurrently with output collection so a child that
/// talks before it finishes reading cannot deadlock. The child is killed
/// if the timeout elapses (via the tokio `Child` drop implementation).
pub async fn run_with_input(
    mut cmd: Command,
    input: &[u8],
    timeout: Duration,
    description: &str,
) -> Result<Output, String> {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .map_err(|e| format!("{} failed: {}", description, e))?;
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| format!("{} failed: stdin not piped", description))?;

    let run = async {
        let write = async {
            let result = stdin.write_all(input).await;
            drop(stdin);
            result
        };
        let (written, output) = tokio::join!(write, child.wait_with_output());
        // A child that exits without reading everything closes the pipe;
        // its exit status is the better diagnostic.
        if let Err(e) = written {
            tracing::debug!(error = %e, "{} did not consume stdin", description);
        }
        output
    };

    match tokio::time::timeout(timeout, run).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(io_err)) => Err(format!("{} failed: {}", description, io_err)),
        Err(_elapsed) => Err(format!(
            "{} timed out after {}",
            description,
            mp_core::format_duration(timeout)
        )),
    }
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
