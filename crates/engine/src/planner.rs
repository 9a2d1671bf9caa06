// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Weekly plan flow.

use crate::message::Envelope;
use crate::prompt::build_prompt;
use crate::PlannerError;
use chrono::NaiveDate;
use mp_adapters::{InboxAdapter, MailAdapter, MealSelector, NotifyAdapter};
use mp_core::{Meal, MealCounts};
use mp_storage::MealHistory;
use tracing::{error, info, warn};

/// Title of the desktop notification sent when even the failure email
/// could not be delivered.
pub const FAILURE_NOTIFICATION_TITLE: &str = "Meal Planner Failed";

/// External dependencies of the planner flows
pub struct PlannerDeps<S, M, I, N> {
    pub selector: S,
    pub mail: M,
    pub inbox: I,
    pub notifier: N,
    pub history: MealHistory,
}

/// Tunables of the planner flows
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub counts: MealCounts,
    pub exclusion_weeks: u32,
    pub envelope: Envelope,
}

/// Runs the weekly plan and the reply-driven regeneration.
pub struct Planner<S, M, I, N> {
    pub(crate) deps: PlannerDeps<S, M, I, N>,
    pub(crate) config: PlannerConfig,
}

impl<S, M, I, N> Planner<S, M, I, N>
where
    S: MealSelector,
    M: MailAdapter,
    I: InboxAdapter,
    N: NotifyAdapter,
{
    pub fn new(deps: PlannerDeps<S, M, I, N>, config: PlannerConfig) -> Self {
        Self { deps, config }
    }

    /// Plan the week starting `today`, reporting any failure.
    ///
    /// On error a failure email is attempted, then a desktop notification
    /// if the email could not be sent. The original error is returned.
    pub async fn run_plan(&self, today: NaiveDate) -> Result<Vec<Meal>, PlannerError> {
        info!(%today, "starting meal planner");
        match self.plan(today).await {
            Ok(meals) => {
                info!("meal planner completed successfully");
                Ok(meals)
            }
            Err(e) => {
                error!(error = %e, "meal planner failed");
                self.report_failure(&e, today).await;
                Err(e)
            }
        }
    }

    /// Plan the week starting `today` without failure reporting.
    pub async fn plan(&self, today: NaiveDate) -> Result<Vec<Meal>, PlannerError> {
        let excluded = self
            .deps
            .history
            .recent_recipes(self.config.exclusion_weeks, today)?;
        info!(
            count = excluded.len(),
            weeks = self.config.exclusion_weeks,
            "excluding recent recipes"
        );

        let hints = match self.deps.inbox.ingredient_requests().await {
            Ok(hints) => hints,
            Err(e) => {
                warn!(error = %e, "continuing without ingredient requests");
                Vec::new()
            }
        };
        if !hints.is_empty() {
            info!(?hints, "ingredient requests");
        }

        let prompt = build_prompt(&excluded, &hints, &self.config.counts);
        info!(prompt_len = prompt.len(), "built prompt");

        self.deps.selector.preflight().await?;
        let meals = self.deps.selector.select_meals(&prompt).await?;
        info!(count = meals.len(), "claude returned meals");
        if meals.is_empty() {
            return Err(PlannerError::NoValidMeals);
        }

        self.deps.history.append(&meals, today)?;
        info!(count = meals.len(), "saved meals to history");

        let message = self.config.envelope.plan(&meals, today);
        self.deps.mail.send(&message).await?;
        info!("meal plan email sent");

        Ok(meals)
    }

    async fn report_failure(&self, failure: &PlannerError, today: NaiveDate) {
        let reason = failure.to_string();
        let message = self.config.envelope.failure(&reason, today);
        let mail_error = match self.deps.mail.send(&message).await {
            Ok(()) => {
                info!("failure notification email sent");
                return;
            }
            Err(e) => e,
        };
        error!(error = %mail_error, "could not send failure email");

        let body = format!("{}\n(email also failed: {})", reason, mail_error);
        if let Err(e) = self
            .deps
            .notifier
            .notify(FAILURE_NOTIFICATION_TITLE, &body)
            .await
        {
            error!(error = %e, "could not show desktop notification");
        }
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
