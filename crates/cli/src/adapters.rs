// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter selection from configuration.
//!
//! Each enum picks a real or no-op adapter at runtime while keeping the
//! planner's adapter types static.

use crate::config::Config;
use async_trait::async_trait;
use mp_adapters::{
    ClaudeClient, ClaudeConfig, DesktopNotifyAdapter, InboxAdapter, InboxError, MailAdapter,
    MailError, MailFilter, MailMessage, MaildirInbox, NoOpInbox, NoOpMailAdapter,
    NoOpNotifyAdapter, NotifyAdapter, NotifyError, SendmailAdapter, TracedInbox, TracedMail,
};
use mp_engine::{Envelope, Planner, PlannerConfig, PlannerDeps, MEAL_SCHEMA};
use mp_storage::MealHistory;

#[derive(Clone)]
pub enum Mailer {
    Sendmail(TracedMail<SendmailAdapter>),
    Disabled(NoOpMailAdapter),
}

#[async_trait]
impl MailAdapter for Mailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        match self {
            Mailer::Sendmail(inner) => inner.send(message).await,
            Mailer::Disabled(inner) => inner.send(message).await,
        }
    }
}

#[derive(Clone)]
pub enum Inbox {
    Maildir(TracedInbox<MaildirInbox>),
    Disabled(NoOpInbox),
}

#[async_trait]
impl InboxAdapter for Inbox {
    async fn ingredient_requests(&self) -> Result<Vec<String>, InboxError> {
        match self {
            Inbox::Maildir(inner) => inner.ingredient_requests().await,
            Inbox::Disabled(inner) => inner.ingredient_requests().await,
        }
    }

    async fn plan_replies(&self) -> Result<Vec<String>, InboxError> {
        match self {
            Inbox::Maildir(inner) => inner.plan_replies().await,
            Inbox::Disabled(inner) => inner.plan_replies().await,
        }
    }
}

#[derive(Clone)]
pub enum Notifier {
    Desktop(DesktopNotifyAdapter),
    Disabled(NoOpNotifyAdapter),
}

#[async_trait]
impl NotifyAdapter for Notifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        match self {
            Notifier::Desktop(inner) => inner.notify(title, message).await,
            Notifier::Disabled(inner) => inner.notify(title, message).await,
        }
    }
}

pub type AppPlanner = Planner<ClaudeClient, Mailer, Inbox, Notifier>;

pub fn claude_config(config: &Config) -> ClaudeConfig {
    let settings = &config.claude;
    let mut claude = ClaudeConfig::new(
        &settings.bin,
        &settings.mcp_config,
        MEAL_SCHEMA.clone(),
    );
    claude.timeout = settings.timeout;
    claude.grace = settings.grace;
    claude.max_budget_usd = settings.max_budget_usd.clone();
    claude.expected = config.meals;
    claude.preflight_host = settings.preflight_host.clone();
    claude
}

pub fn mailer(config: &Config) -> Mailer {
    if config.mail.enabled {
        Mailer::Sendmail(TracedMail::new(SendmailAdapter::new(&config.mail.sendmail)))
    } else {
        Mailer::Disabled(NoOpMailAdapter::new())
    }
}

pub fn inbox(config: &Config) -> Inbox {
    match &config.inbox.maildir {
        Some(maildir) => Inbox::Maildir(TracedInbox::new(MaildirInbox::new(
            maildir,
            MailFilter {
                authorized_senders: config.inbox.authorized_senders.clone(),
                ingredient_keyword: config.inbox.ingredient_keyword.clone(),
                reply_prefix: config.inbox.reply_subject_prefix.clone(),
            },
        ))),
        None => Inbox::Disabled(NoOpInbox::new()),
    }
}

pub fn notifier(config: &Config) -> Notifier {
    if config.notify.desktop {
        Notifier::Desktop(DesktopNotifyAdapter::new())
    } else {
        Notifier::Disabled(NoOpNotifyAdapter::new())
    }
}

pub fn build_planner(config: &Config) -> AppPlanner {
    Planner::new(
        PlannerDeps {
            selector: ClaudeClient::new(claude_config(config)),
            mail: mailer(config),
            inbox: inbox(config),
            notifier: notifier(config),
            history: MealHistory::new(&config.history_path),
        },
        PlannerConfig {
            counts: config.meals,
            exclusion_weeks: config.exclusion_weeks,
            envelope: Envelope {
                from: config.mail.sender.clone(),
                to: config.mail.recipients.clone(),
            },
        },
    )
}

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;
