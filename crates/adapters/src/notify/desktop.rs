// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification adapter using notify-rust.
//!
//! On macOS, `notify-rust` goes through `mac-notification-sys`, whose first
//! notification runs an AppleScript to look up a bundle identifier. Under
//! cron that lookup can block forever, so the identifier is set up front.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;

const APP_NAME: &str = "Meal Planner";

#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let message = message.to_string();
        // The process exits right after reporting a failure, so the
        // blocking show() must finish before returning.
        let shown = tokio::task::spawn_blocking(move || {
            tracing::info!(%title, "sending desktop notification");
            notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&title)
                .body(&message)
                .show()
                .map(|_| ())
        })
        .await
        .map_err(|e| NotifyError::SendFailed(e.to_string()))?;

        shown.map_err(|e| NotifyError::SendFailed(e.to_string()))
    }
}
