// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Incoming mail adapters

mod maildir;
mod noop;
mod parse;
mod reply;

pub use maildir::MaildirInbox;
pub use noop::NoOpInbox;
pub use parse::ParsedMail;
pub use reply::strip_quoted_text;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeInbox;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from inbox operations
#[derive(Debug, Error)]
pub enum InboxError {
    #[error("maildir not found: {}", .0.display())]
    MissingMaildir(PathBuf),
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which unread messages count as requests or replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailFilter {
    /// Sender addresses allowed to steer the planner.
    pub authorized_senders: Vec<String>,
    /// Subject substring marking an ingredient request.
    pub ingredient_keyword: String,
    /// Subject prefix marking a reply to a plan email.
    pub reply_prefix: String,
}

impl MailFilter {
    pub fn is_authorized(&self, mail: &ParsedMail) -> bool {
        let Some(address) = mail.sender_address() else {
            return false;
        };
        self.authorized_senders
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(&address))
    }

    pub fn is_ingredient_request(&self, subject: &str) -> bool {
        !self.ingredient_keyword.is_empty()
            && subject
                .to_lowercase()
                .contains(&self.ingredient_keyword.to_lowercase())
    }

    pub fn is_plan_reply(&self, subject: &str) -> bool {
        !self.reply_prefix.is_empty()
            && subject
                .trim_start()
                .to_lowercase()
                .starts_with(&self.reply_prefix.to_lowercase())
    }
}

/// Adapter for reading unread mail addressed to the planner.
///
/// Both operations mark what they return as seen, so each message is
/// consumed at most once.
#[async_trait]
pub trait InboxAdapter: Clone + Send + Sync + 'static {
    /// Subjects of unread ingredient requests.
    async fn ingredient_requests(&self) -> Result<Vec<String>, InboxError>;

    /// Bodies of unread plan replies, with quoted text removed.
    async fn plan_replies(&self) -> Result<Vec<String>, InboxError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
