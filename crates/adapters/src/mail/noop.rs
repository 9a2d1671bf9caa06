// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op mail adapter.

use super::{MailAdapter, MailError, MailMessage};
use async_trait::async_trait;

/// Mail adapter that logs and discards every message.
///
/// Used for dry runs when `mail.enabled = false`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpMailAdapter;

impl NoOpMailAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailAdapter for NoOpMailAdapter {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        tracing::info!(
            subject = %message.subject,
            recipients = message.to.len(),
            "mail disabled, not sending"
        );
        Ok(())
    }
}
