// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op inbox adapter.

use super::{InboxAdapter, InboxError};
use async_trait::async_trait;

/// Inbox that never has mail.
///
/// Used when no maildir is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpInbox;

impl NoOpInbox {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InboxAdapter for NoOpInbox {
    async fn ingredient_requests(&self) -> Result<Vec<String>, InboxError> {
        Ok(Vec::new())
    }

    async fn plan_replies(&self) -> Result<Vec<String>, InboxError> {
        Ok(Vec::new())
    }
}
