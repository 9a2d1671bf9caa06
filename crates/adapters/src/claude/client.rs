// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claude CLI client: one synchronous invocation per meal selection

use super::env::claude_env;
use super::extract::{extract_payload, meal_records};
use super::runner::{run_invocation, Invocation, DIAGNOSTIC_LEN};
use super::{ClaudeError, ClaudeObserver, MealSelector, TracingObserver};
use async_trait::async_trait;
use mp_core::{validate_meals, Meal, MealCounts, Truncate};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Default wall-clock limit; Notion and web searches are slow.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(900);

/// Default time readers get to flush after the child is killed.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(2);

/// Limit on the network preflight lookup.
const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(5);

/// Static configuration for [`ClaudeClient`].
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    /// Path to the `claude` executable
    pub bin: PathBuf,
    pub timeout: Duration,
    pub grace: Duration,
    /// Spending ceiling passed as `--max-budget-usd`
    pub max_budget_usd: String,
    /// MCP server config passed as `--mcp-config`
    pub mcp_config: PathBuf,
    /// Schema passed as `--json-schema`
    pub json_schema: Value,
    pub expected: MealCounts,
    /// `host:port` resolved before invoking; `None` skips the check
    pub preflight_host: Option<String>,
}

impl ClaudeConfig {
    pub fn new(bin: impl Into<PathBuf>, mcp_config: impl Into<PathBuf>, json_schema: Value) -> Self {
        Self {
            bin: bin.into(),
            timeout: DEFAULT_TIMEOUT,
            grace: DEFAULT_GRACE,
            max_budget_usd: "1.00".to_string(),
            mcp_config: mcp_config.into(),
            json_schema,
            expected: MealCounts::default(),
            preflight_host: None,
        }
    }
}

/// Invokes the Claude CLI and recovers validated meals from its output.
#[derive(Clone)]
pub struct ClaudeClient<O = TracingObserver> {
    config: Arc<ClaudeConfig>,
    home: Option<PathBuf>,
    observer: O,
}

impl ClaudeClient<TracingObserver> {
    pub fn new(config: ClaudeConfig) -> Self {
        Self::with_observer(config, TracingObserver)
    }
}

impl<O: ClaudeObserver> ClaudeClient<O> {
    pub fn with_observer(config: ClaudeConfig, observer: O) -> Self {
        Self {
            config: Arc::new(config),
            home: dirs::home_dir(),
            observer,
        }
    }

    pub fn config(&self) -> &ClaudeConfig {
        &self.config
    }

    /// Build the command line for `prompt`, with the environment derived
    /// from this process's.
    pub fn invocation(&self, prompt: &str) -> Invocation {
        let config = &self.config;
        let args = vec![
            "-p".to_string(),
            "--output-format".to_string(),
            "json".to_string(),
            "--json-schema".to_string(),
            config.json_schema.to_string(),
            "--permission-mode".to_string(),
            "bypassPermissions".to_string(),
            "--no-session-persistence".to_string(),
            "--max-budget-usd".to_string(),
            config.max_budget_usd.clone(),
            "--mcp-config".to_string(),
            config.mcp_config.display().to_string(),
            prompt.to_string(),
        ];
        Invocation {
            program: config.bin.clone(),
            args,
            env: claude_env(std::env::vars(), self.home.as_deref()),
        }
    }

    /// Run the CLI once and return the structured payload.
    pub async fn call(&self, prompt: &str) -> Result<Value, ClaudeError> {
        let invocation = self.invocation(prompt);
        self.observer.invoking(&invocation.program, prompt.len());

        let output = run_invocation(
            &invocation,
            self.config.timeout,
            self.config.grace,
            &self.observer,
        )
        .await?;

        match output.status.code() {
            Some(0) => {}
            Some(code) => {
                return Err(ClaudeError::NonZeroExit {
                    code,
                    stderr: output.stderr_text().tail(DIAGNOSTIC_LEN).to_string(),
                })
            }
            None => {
                return Err(ClaudeError::Signaled {
                    stderr: output.stderr_text().tail(DIAGNOSTIC_LEN).to_string(),
                })
            }
        }

        extract_payload(&output.stdout).inspect_err(|e| {
            if let ClaudeError::MissingPayload { envelope, .. } = e {
                self.observer.missing_payload(envelope);
            }
        })
    }
}

#[async_trait]
impl<O: ClaudeObserver> MealSelector for ClaudeClient<O> {
    async fn preflight(&self) -> Result<(), ClaudeError> {
        let Some(host) = self.config.preflight_host.as_deref() else {
            return Ok(());
        };
        let network_error = |reason: String| ClaudeError::Network {
            host: host.to_string(),
            reason,
        };
        match tokio::time::timeout(PREFLIGHT_TIMEOUT, tokio::net::lookup_host(host)).await {
            Ok(Ok(mut addrs)) => {
                if addrs.next().is_none() {
                    return Err(network_error("no addresses".to_string()));
                }
                tracing::info!(host, "network check passed");
                Ok(())
            }
            Ok(Err(e)) => Err(network_error(e.to_string())),
            Err(_) => Err(network_error("lookup timed out".to_string())),
        }
    }

    async fn select_meals(&self, prompt: &str) -> Result<Vec<Meal>, ClaudeError> {
        let payload = self.call(prompt).await?;
        let records = meal_records(&payload);
        tracing::info!(count = records.len(), "claude returned meals");

        let validated = validate_meals(&records, &self.config.expected);
        for warning in &validated.warnings {
            self.observer.meal_warning(warning);
        }
        Ok(validated.meals)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
