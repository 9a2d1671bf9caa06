// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake mail adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MailAdapter, MailError, MailMessage};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Default)]
struct FakeMailState {
    sent: Vec<MailMessage>,
    fail_with: Option<String>,
}

/// Fake mail adapter for testing
#[derive(Clone, Default)]
pub struct FakeMailAdapter {
    inner: Arc<Mutex<FakeMailState>>,
}

impl FakeMailAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.inner.lock().fail_with = Some(reason.into());
    }

    /// Get all successfully sent messages
    pub fn sent(&self) -> Vec<MailMessage> {
        self.inner.lock().sent.clone()
    }

    /// Subjects of all sent messages, in order
    pub fn subjects(&self) -> Vec<String> {
        self.inner
            .lock()
            .sent
            .iter()
            .map(|m| m.subject.clone())
            .collect()
    }
}

#[async_trait]
impl MailAdapter for FakeMailAdapter {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let mut inner = self.inner.lock();
        if let Some(reason) = &inner.fail_with {
            return Err(MailError::SendFailed(reason.clone()));
        }
        inner.sent.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
