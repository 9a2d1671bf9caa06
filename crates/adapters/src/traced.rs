// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::inbox::{InboxAdapter, InboxError};
use crate::mail::{MailAdapter, MailError, MailMessage};
use async_trait::async_trait;
use tracing::Instrument;

/// Wrapper that adds tracing to any MailAdapter
#[derive(Clone)]
pub struct TracedMail<M> {
    inner: M,
}

impl<M> TracedMail<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<M: MailAdapter> MailAdapter for TracedMail<M> {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let span = tracing::info_span!("mail.send", subject = %message.subject);
        async {
            tracing::info!(recipients = message.to.len(), "sending");
            let start = std::time::Instant::now();
            let result = self.inner.send(message).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "email sent"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "email failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any InboxAdapter
#[derive(Clone)]
pub struct TracedInbox<I> {
    inner: I,
}

impl<I> TracedInbox<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<I: InboxAdapter> InboxAdapter for TracedInbox<I> {
    async fn ingredient_requests(&self) -> Result<Vec<String>, InboxError> {
        let result = self.inner.ingredient_requests().await;
        tracing::info_span!("inbox.requests").in_scope(|| match &result {
            Ok(found) => tracing::info!(count = found.len(), "checked ingredient requests"),
            Err(e) => tracing::warn!(error = %e, "could not read ingredient emails"),
        });
        result
    }

    async fn plan_replies(&self) -> Result<Vec<String>, InboxError> {
        let result = self.inner.plan_replies().await;
        tracing::info_span!("inbox.replies").in_scope(|| match &result {
            Ok(found) => tracing::info!(count = found.len(), "checked plan replies"),
            Err(e) => tracing::warn!(error = %e, "could not read meal plan reply emails"),
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
