// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reply-driven plan regeneration.
//!
//! Runs often from cron; every outcome other than a revised plan is a
//! normal no-op, and errors are only logged by the caller.

use crate::planner::Planner;
use crate::prompt::build_regeneration_prompt;
use crate::PlannerError;
use chrono::NaiveDate;
use mp_adapters::{InboxAdapter, MailAdapter, MealSelector, NotifyAdapter};
use mp_core::{Meal, Truncate};
use tracing::{error, info, warn};

/// How a regeneration run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegenerateOutcome {
    /// No unread replies to act on
    NoReplies,
    /// Nothing in the history to revise
    NoHistory,
    /// Claude returned no valid meals; the plan was left as is
    Skipped,
    /// The plan for `date` was replaced and re-sent
    Revised { date: NaiveDate, meals: Vec<Meal> },
}

impl<S, M, I, N> Planner<S, M, I, N>
where
    S: MealSelector,
    M: MailAdapter,
    I: InboxAdapter,
    N: NotifyAdapter,
{
    /// Revise the latest plan from unread replies.
    ///
    /// `today` anchors the exclusion window.
    pub async fn regenerate(&self, today: NaiveDate) -> Result<RegenerateOutcome, PlannerError> {
        let replies = match self.deps.inbox.plan_replies().await {
            Ok(replies) => replies,
            Err(e) => {
                warn!(error = %e, "treating unreadable inbox as no replies");
                Vec::new()
            }
        };
        if replies.is_empty() {
            info!("no unread meal plan replies found");
            return Ok(RegenerateOutcome::NoReplies);
        }
        info!(count = replies.len(), "found meal plan replies");

        let Some(date) = self.deps.history.latest_date()? else {
            warn!("no meal history found, cannot regenerate");
            return Ok(RegenerateOutcome::NoHistory);
        };
        let current = self.deps.history.plan_for(date)?;
        if current.is_empty() {
            warn!(%date, "no meals found for latest plan, cannot regenerate");
            return Ok(RegenerateOutcome::NoHistory);
        }
        info!(%date, count = current.len(), "loaded current plan");

        // The current plan is itself recent history; keeping liked meals
        // requires leaving it out of the exclusions.
        let excluded: Vec<String> = self
            .deps
            .history
            .recent_recipes(self.config.exclusion_weeks, today)?
            .into_iter()
            .filter(|name| !current.iter().any(|m| &m.recipe_name == name))
            .collect();
        info!(count = excluded.len(), "excluding recent recipes");

        let feedback = replies.join("\n\n");
        info!(
            feedback_len = feedback.len(),
            feedback = %feedback.head(200),
            "combined feedback"
        );

        let prompt = build_regeneration_prompt(&current, &feedback, &excluded, &self.config.counts);
        info!(prompt_len = prompt.len(), "built prompt");

        self.deps.selector.preflight().await?;
        let meals = self.deps.selector.select_meals(&prompt).await?;
        info!(count = meals.len(), "claude returned meals");
        if meals.is_empty() {
            error!("no valid meals returned from claude, keeping current plan");
            return Ok(RegenerateOutcome::Skipped);
        }

        self.deps.history.replace(&meals, date)?;
        info!(%date, "replaced meal plan in history");

        let message = self.config.envelope.revised_plan(&meals, date);
        self.deps.mail.send(&message).await?;
        info!("revised meal plan email sent");

        Ok(RegenerateOutcome::Revised { date, meals })
    }
}

#[cfg(test)]
#[path = "regenerate_tests.rs"]
mod tests;
