// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claude CLI adapter
//!
//! Meal selection is delegated to the `claude` command-line tool. One call
//! is one child process:
//!
//! ```text
//! claude_env ──▶ run_invocation ──▶ extract_payload ──▶ validate_meals
//!  (PATH, no       (two readers,      (strategy chain     (counts warn,
//!   CLAUDECODE)     deadline, kill)    over envelope)      drop partial)
//! ```

mod client;
pub mod env;
pub mod extract;
mod observer;
pub mod runner;

pub use client::{ClaudeClient, ClaudeConfig, DEFAULT_GRACE, DEFAULT_TIMEOUT};
pub use extract::{extract_payload, meal_records};
pub use observer::{ClaudeObserver, TracingObserver};
pub use runner::{run_invocation, Invocation, RunOutput};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeMealSelector, FakeObserver, ObserverCall, SelectorCall};

use async_trait::async_trait;
use mp_core::{format_duration, Meal};
use std::time::Duration;
use thiserror::Error;

/// Errors from a Claude invocation
#[derive(Debug, Error)]
pub enum ClaudeError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("claude cli i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("claude cli timed out after {}", fmt_timeout(.timeout))]
    Timeout {
        timeout: Duration,
        stdout: String,
        stderr: String,
    },
    #[error("claude cli exited with code {code}\nstderr: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
    #[error("claude cli was terminated by a signal\nstderr: {stderr}")]
    Signaled { stderr: String },
    #[error("claude cli output is not valid JSON: {0}")]
    MalformedOutput(#[source] serde_json::Error),
    #[error("claude cli output is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
    #[error("no structured_output in claude response. Keys: {keys:?}")]
    MissingPayload { keys: Vec<String>, envelope: String },
    #[error("no network connectivity to {host}: {reason}")]
    Network { host: String, reason: String },
}

impl ClaudeError {
    /// True when the CLI was killed at the deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClaudeError::Timeout { .. })
    }
}

fn fmt_timeout(timeout: &Duration) -> String {
    format_duration(*timeout)
}

/// Selects meals for a prompt.
///
/// Returns the validated, possibly empty, meal list. Callers decide
/// whether an empty plan is fatal.
#[async_trait]
pub trait MealSelector: Clone + Send + Sync + 'static {
    /// Cheap check that the selector's backend is reachable.
    async fn preflight(&self) -> Result<(), ClaudeError>;

    async fn select_meals(&self, prompt: &str) -> Result<Vec<Meal>, ClaudeError>;
}
