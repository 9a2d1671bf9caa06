// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake inbox adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{InboxAdapter, InboxError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Default)]
struct FakeInboxState {
    requests: Vec<String>,
    replies: Vec<String>,
    unavailable: bool,
}

/// Fake inbox for testing.
///
/// Queued mail is drained by the first read, like a real inbox marking
/// messages seen.
#[derive(Clone, Default)]
pub struct FakeInbox {
    inner: Arc<Mutex<FakeInboxState>>,
}

impl FakeInbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_request(&self, subject: impl Into<String>) {
        self.inner.lock().requests.push(subject.into());
    }

    pub fn push_reply(&self, body: impl Into<String>) {
        self.inner.lock().replies.push(body.into());
    }

    /// Make every read fail as if the maildir were missing.
    pub fn set_unavailable(&self) {
        self.inner.lock().unavailable = true;
    }
}

#[async_trait]
impl InboxAdapter for FakeInbox {
    async fn ingredient_requests(&self) -> Result<Vec<String>, InboxError> {
        let mut inner = self.inner.lock();
        if inner.unavailable {
            return Err(InboxError::MissingMaildir(PathBuf::from("fake")));
        }
        Ok(std::mem::take(&mut inner.requests))
    }

    async fn plan_replies(&self) -> Result<Vec<String>, InboxError> {
        let mut inner = self.inner.lock();
        if inner.unavailable {
            return Err(InboxError::MissingMaildir(PathBuf::from("fake")));
        }
        Ok(std::mem::take(&mut inner.replies))
    }
}
