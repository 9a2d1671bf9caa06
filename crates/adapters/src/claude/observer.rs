// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observability port for Claude invocations
//!
//! The client reports progress through a [`ClaudeObserver`] instead of
//! logging directly. Its result is always carried by the returned value
//! or error; observers only see a side channel.

use mp_core::MealWarning;
use std::path::Path;
use std::time::Duration;

/// Receives progress reports from a Claude invocation.
///
/// Observers are cloned into the stderr reader task, so they must be cheap
/// to clone and safe to call from another task.
pub trait ClaudeObserver: Clone + Send + Sync + 'static {
    /// The CLI is about to be launched.
    fn invoking(&self, program: &Path, prompt_len: usize);

    /// One line of CLI stderr, in arrival order.
    fn stderr_line(&self, line: &str);

    /// The CLI exited on its own. `code` is `None` when killed by a signal.
    fn exited(&self, code: Option<i32>, elapsed: Duration);

    /// The deadline elapsed and the CLI was killed. Output is bounded.
    fn timed_out(&self, timeout: Duration, stdout: &str, stderr: &str);

    /// No payload was found in the envelope. `envelope` is bounded.
    fn missing_payload(&self, envelope: &str);

    /// A non-fatal problem with the returned meals.
    fn meal_warning(&self, warning: &MealWarning);
}

/// Default observer: forwards every report to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl ClaudeObserver for TracingObserver {
    fn invoking(&self, program: &Path, prompt_len: usize) {
        tracing::info!(program = %program.display(), prompt_len, "calling claude cli");
    }

    fn stderr_line(&self, line: &str) {
        tracing::warn!(target: "claude::stderr", "{}", line);
    }

    fn exited(&self, code: Option<i32>, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis() as u64;
        match code {
            Some(0) => tracing::info!(elapsed_ms, "claude cli finished"),
            Some(code) => tracing::error!(code, elapsed_ms, "claude cli failed"),
            None => tracing::error!(elapsed_ms, "claude cli terminated by signal"),
        }
    }

    fn timed_out(&self, timeout: Duration, stdout: &str, stderr: &str) {
        let timeout_ms = timeout.as_millis() as u64;
        tracing::error!(timeout_ms, "claude cli stdout before timeout: {:?}", stdout);
        tracing::error!(timeout_ms, "claude cli stderr before timeout: {:?}", stderr);
    }

    fn missing_payload(&self, envelope: &str) {
        tracing::error!("full claude response: {}", envelope);
    }

    fn meal_warning(&self, warning: &MealWarning) {
        tracing::warn!("{}", warning);
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
