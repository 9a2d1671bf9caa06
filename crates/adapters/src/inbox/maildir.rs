// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Maildir-backed inbox.
//!
//! Mail is fetched into the maildir by an external tool (fetchmail,
//! mbsync, ...). Unread messages live in `new/`; a consumed message is
//! moved to `cur/` with the seen flag.

use super::{strip_quoted_text, InboxAdapter, InboxError, MailFilter, ParsedMail};
use async_trait::async_trait;
use mp_core::Truncate;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct MaildirInbox {
    root: PathBuf,
    filter: Arc<MailFilter>,
}

impl MaildirInbox {
    pub fn new(root: impl Into<PathBuf>, filter: MailFilter) -> Self {
        Self {
            root: root.into(),
            filter: Arc::new(filter),
        }
    }

    /// Unread messages from authorized senders, oldest file name first.
    async fn unread(&self) -> Result<Vec<(PathBuf, ParsedMail)>, InboxError> {
        let new_dir = self.root.join("new");
        if !tokio::fs::try_exists(&new_dir)
            .await
            .map_err(io_error(&new_dir))?
        {
            return Err(InboxError::MissingMaildir(self.root.clone()));
        }

        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(&new_dir)
            .await
            .map_err(io_error(&new_dir))?;
        while let Some(entry) = entries.next_entry().await.map_err(io_error(&new_dir))? {
            let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if is_file && !hidden {
                paths.push(entry.path());
            }
        }
        paths.sort();

        let mut messages = Vec::new();
        for path in paths {
            let raw = match tokio::fs::read(&path).await {
                Ok(raw) => raw,
                // Another reader may have claimed it since the listing
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(io_error(&path)(e)),
            };
            let mail = ParsedMail::parse(&String::from_utf8_lossy(&raw));
            if self.filter.is_authorized(&mail) {
                messages.push((path, mail));
            }
        }
        Ok(messages)
    }

    async fn mark_seen(&self, path: &Path) -> Result<(), InboxError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let unique = name.split_once(":2,").map_or(name.as_str(), |(u, _)| u);
        let cur_dir = self.root.join("cur");
        tokio::fs::create_dir_all(&cur_dir)
            .await
            .map_err(io_error(&cur_dir))?;
        let target = cur_dir.join(format!("{}:2,S", unique));
        tokio::fs::rename(path, &target)
            .await
            .map_err(io_error(path))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> InboxError + '_ {
    move |source| InboxError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl InboxAdapter for MaildirInbox {
    async fn ingredient_requests(&self) -> Result<Vec<String>, InboxError> {
        let mut subjects = Vec::new();
        for (path, mail) in self.unread().await? {
            let subject = mail.subject().trim();
            if subject.is_empty() || !self.filter.is_ingredient_request(subject) {
                continue;
            }
            tracing::info!(%subject, "found ingredient request");
            subjects.push(subject.to_string());
            self.mark_seen(&path).await?;
        }
        Ok(subjects)
    }

    async fn plan_replies(&self) -> Result<Vec<String>, InboxError> {
        let mut bodies = Vec::new();
        for (path, mail) in self.unread().await? {
            if !self.filter.is_plan_reply(mail.subject()) {
                continue;
            }
            let body = mail
                .text_body()
                .map(|text| strip_quoted_text(&text))
                .unwrap_or_default();
            if body.is_empty() {
                tracing::warn!(
                    path = %path.display(),
                    "found reply email but could not extract body text"
                );
            } else {
                tracing::info!(reply = %body.head(100), "found meal plan reply");
                bodies.push(body);
            }
            self.mark_seen(&path).await?;
        }
        Ok(bodies)
    }
}

#[cfg(test)]
#[path = "maildir_tests.rs"]
mod tests;
