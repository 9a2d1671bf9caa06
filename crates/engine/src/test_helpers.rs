// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{Envelope, Planner, PlannerConfig, PlannerDeps};
use chrono::NaiveDate;
use mp_adapters::{FakeInbox, FakeMailAdapter, FakeMealSelector, FakeNotifyAdapter};
use mp_core::{Meal, MealCounts, MealSource};
use mp_storage::MealHistory;
use tempfile::TempDir;

/// Convenience alias for the fully-faked planner.
pub(crate) type TestPlanner = Planner<FakeMealSelector, FakeMailAdapter, FakeInbox, FakeNotifyAdapter>;

/// Test context holding the planner, its fakes, and a temp history file.
pub(crate) struct TestContext {
    pub planner: TestPlanner,
    pub selector: FakeMealSelector,
    pub mail: FakeMailAdapter,
    pub inbox: FakeInbox,
    pub notifier: FakeNotifyAdapter,
    pub history: MealHistory,
    _dir: TempDir,
}

pub(crate) fn setup() -> TestContext {
    let dir = TempDir::new().unwrap();
    let history = MealHistory::new(dir.path().join("meal_history.csv"));
    let selector = FakeMealSelector::new();
    let mail = FakeMailAdapter::new();
    let inbox = FakeInbox::new();
    let notifier = FakeNotifyAdapter::new();

    let planner = Planner::new(
        PlannerDeps {
            selector: selector.clone(),
            mail: mail.clone(),
            inbox: inbox.clone(),
            notifier: notifier.clone(),
            history: history.clone(),
        },
        PlannerConfig {
            counts: MealCounts::default(),
            exclusion_weeks: 6,
            envelope: Envelope {
                from: "planner@example.com".to_string(),
                to: vec!["cook@example.com".to_string()],
            },
        },
    );

    TestContext {
        planner,
        selector,
        mail,
        inbox,
        notifier,
        history,
        _dir: dir,
    }
}

pub(crate) fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A valid four-meal plan: three from Notion, one from the web.
pub(crate) fn week(tag: &str) -> Vec<Meal> {
    vec![
        Meal::new(format!("{tag} Lentil Soup"), MealSource::Notion, "https://n/1"),
        Meal::new(format!("{tag} Bean Salad"), MealSource::Notion, "https://n/2"),
        Meal::new(format!("{tag} Sheet Pan Chicken"), MealSource::Notion, "https://n/3"),
        Meal::new(format!("{tag} Shakshuka"), MealSource::Web, "https://w/4"),
    ]
}
