// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outgoing mail adapters

mod noop;
mod sendmail;

pub use noop::NoOpMailAdapter;
pub use sendmail::SendmailAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMailAdapter;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from mail operations
#[derive(Debug, Error)]
pub enum MailError {
    #[error("no recipients configured")]
    NoRecipients,
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// Render as an RFC 5322 message with the given `Message-ID`.
    ///
    /// Header values are flattened to a single line.
    pub fn to_rfc5322(&self, message_id: &str) -> String {
        let mut out = String::new();
        let mut header = |name: &str, value: &str| {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(&single_line(value));
            out.push('\n');
        };
        header("From", &self.from);
        header("To", &self.to.join(", "));
        header("Subject", &self.subject);
        header("Message-ID", &format!("<{}>", message_id));
        header("MIME-Version", "1.0");
        header("Content-Type", "text/plain; charset=utf-8");
        header("Content-Transfer-Encoding", "8bit");
        out.push('\n');
        out.push_str(&self.body);
        if !self.body.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

fn single_line(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Adapter for sending email
#[async_trait]
pub trait MailAdapter: Clone + Send + Sync + 'static {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
