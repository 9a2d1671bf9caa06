// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Email composition.
//!
//! Plan subjects start with `Meal Plan` so that replies carry the
//! `Re: Meal` prefix the inbox watches for. The failure subject must not.

use chrono::NaiveDate;
use mp_adapters::MailMessage;
use mp_core::Meal;
use mp_storage::format_date;
use std::fmt::Write;

/// Sender and recipients shared by every email the planner sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: Vec<String>,
}

impl Envelope {
    pub fn plan(&self, meals: &[Meal], date: NaiveDate) -> MailMessage {
        let date = format_date(date);
        let mut body = format!("Here is your meal plan for the week of {}:\n\n", date);
        push_meal_list(&mut body, meals);
        body.push_str("\nReply to this email to request changes.\n");
        self.message(format!("Meal Plan for Week of {}", date), body)
    }

    pub fn revised_plan(&self, meals: &[Meal], date: NaiveDate) -> MailMessage {
        let date = format_date(date);
        let mut body = format!(
            "Your meal plan for the week of {} has been revised based on your feedback:\n\n",
            date
        );
        push_meal_list(&mut body, meals);
        body.push_str("\nReply again to request more changes.\n");
        self.message(format!("Meal Plan (Revised) for Week of {}", date), body)
    }

    pub fn failure(&self, error: &str, date: NaiveDate) -> MailMessage {
        let date = format_date(date);
        let body = format!(
            "The weekly meal planner run for {} failed:\n\n{}\n\n\
             Check the run log for details.\n",
            date, error
        );
        self.message(format!("Weekly meal planner failed ({})", date), body)
    }

    fn message(&self, subject: String, body: String) -> MailMessage {
        MailMessage {
            from: self.from.clone(),
            to: self.to.clone(),
            subject,
            body,
        }
    }
}

fn push_meal_list(body: &mut String, meals: &[Meal]) {
    for (i, meal) in meals.iter().enumerate() {
        let _ = writeln!(body, "{}. {} ({})", i + 1, meal.recipe_name, meal.source);
        if !meal.url.is_empty() {
            let _ = writeln!(body, "   {}", meal.url);
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
