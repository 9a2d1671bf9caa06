// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake Claude observer and meal selector for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClaudeError, ClaudeObserver, MealSelector};
use async_trait::async_trait;
use mp_core::{Meal, MealWarning};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Recorded observer report
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverCall {
    Invoking { prompt_len: usize },
    StderrLine(String),
    Exited { code: Option<i32> },
    TimedOut { stdout: String, stderr: String },
    MissingPayload { envelope: String },
    MealWarning(MealWarning),
}

/// Observer that records every report
#[derive(Clone, Default)]
pub struct FakeObserver {
    calls: Arc<Mutex<Vec<ObserverCall>>>,
}

impl FakeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded reports
    pub fn calls(&self) -> Vec<ObserverCall> {
        self.calls.lock().clone()
    }

    /// Stderr lines in the order they were reported
    pub fn stderr_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                ObserverCall::StderrLine(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    /// Meal warnings in the order they were reported
    pub fn meal_warnings(&self) -> Vec<MealWarning> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                ObserverCall::MealWarning(w) => Some(w.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ObserverCall) {
        self.calls.lock().push(call);
    }
}

impl ClaudeObserver for FakeObserver {
    fn invoking(&self, _program: &Path, prompt_len: usize) {
        self.record(ObserverCall::Invoking { prompt_len });
    }

    fn stderr_line(&self, line: &str) {
        self.record(ObserverCall::StderrLine(line.to_string()));
    }

    fn exited(&self, code: Option<i32>, _elapsed: Duration) {
        self.record(ObserverCall::Exited { code });
    }

    fn timed_out(&self, _timeout: Duration, stdout: &str, stderr: &str) {
        self.record(ObserverCall::TimedOut {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        });
    }

    fn missing_payload(&self, envelope: &str) {
        self.record(ObserverCall::MissingPayload {
            envelope: envelope.to_string(),
        });
    }

    fn meal_warning(&self, warning: &MealWarning) {
        self.record(ObserverCall::MealWarning(warning.clone()));
    }
}

/// Recorded call to FakeMealSelector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorCall {
    Preflight,
    SelectMeals { prompt: String },
}

struct FakeSelectorState {
    calls: Vec<SelectorCall>,
    responses: VecDeque<Result<Vec<Meal>, ClaudeError>>,
    preflight_error: Option<ClaudeError>,
}

/// Fake meal selector for testing
///
/// Returns queued responses in order, then empty meal lists.
#[derive(Clone)]
pub struct FakeMealSelector {
    inner: Arc<Mutex<FakeSelectorState>>,
}

impl Default for FakeMealSelector {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeSelectorState {
                calls: Vec::new(),
                responses: VecDeque::new(),
                preflight_error: None,
            })),
        }
    }
}

impl FakeMealSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue meals for the next `select_meals` call
    pub fn push_meals(&self, meals: Vec<Meal>) {
        self.inner.lock().responses.push_back(Ok(meals));
    }

    /// Queue an error for the next `select_meals` call
    pub fn push_error(&self, error: ClaudeError) {
        self.inner.lock().responses.push_back(Err(error));
    }

    /// Make the next `preflight` call fail
    pub fn set_preflight_error(&self, error: ClaudeError) {
        self.inner.lock().preflight_error = Some(error);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SelectorCall> {
        self.inner.lock().calls.clone()
    }

    /// Prompts passed to `select_meals`, in order
    pub fn prompts(&self) -> Vec<String> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                SelectorCall::SelectMeals { prompt } => Some(prompt.clone()),
                SelectorCall::Preflight => None,
            })
            .collect()
    }
}

#[async_trait]
impl MealSelector for FakeMealSelector {
    async fn preflight(&self) -> Result<(), ClaudeError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SelectorCall::Preflight);
        match inner.preflight_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn select_meals(&self, prompt: &str) -> Result<Vec<Meal>, ClaudeError> {
        let mut inner = self.inner.lock();
        inner.calls.push(SelectorCall::SelectMeals {
            prompt: prompt.to_string(),
        });
        inner.responses.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}
