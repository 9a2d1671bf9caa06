// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: the claude CLI, outgoing and incoming mail,
//! and desktop notifications.

pub mod claude;
pub mod inbox;
pub mod mail;
pub mod notify;
pub mod subprocess;
pub mod traced;

pub use claude::{ClaudeClient, ClaudeConfig, ClaudeError, MealSelector, TracingObserver};
pub use inbox::{InboxAdapter, InboxError, MailFilter, MaildirInbox, NoOpInbox};
pub use mail::{MailAdapter, MailError, MailMessage, NoOpMailAdapter, SendmailAdapter};
pub use notify::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError};
pub use traced::{TracedInbox, TracedMail};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use claude::{FakeMealSelector, FakeObserver, ObserverCall, SelectorCall};
#[cfg(any(test, feature = "test-support"))]
pub use inbox::FakeInbox;
#[cfg(any(test, feature = "test-support"))]
pub use mail::FakeMailAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
