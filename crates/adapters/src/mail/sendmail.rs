// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mail adapter that hands messages to a local `sendmail`.
//!
//! Delivery (SMTP relay, credentials) is the MTA's job; `-t` reads the
//! recipients from the headers and `-i` keeps a lone `.` line in the body.

use super::{MailAdapter, MailError, MailMessage};
use crate::subprocess::{run_with_input, SENDMAIL_TIMEOUT};
use async_trait::async_trait;
use mp_core::Truncate;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

#[derive(Clone, Debug)]
pub struct SendmailAdapter {
    program: PathBuf,
    timeout: Duration,
}

impl SendmailAdapter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: SENDMAIL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl MailAdapter for SendmailAdapter {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        if message.to.is_empty() {
            return Err(MailError::NoRecipients);
        }
        let message_id = format!("{}@meal-planner", uuid::Uuid::new_v4());
        let text = message.to_rfc5322(&message_id);

        let mut cmd = Command::new(&self.program);
        cmd.args(["-t", "-i"]);
        let output = run_with_input(cmd, text.as_bytes(), self.timeout, "sendmail")
            .await
            .map_err(MailError::SendFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MailError::SendFailed(format!(
                "sendmail exited with {}: {}",
                output.status,
                stderr.trim().tail(500)
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "sendmail_tests.rs"]
mod tests;
