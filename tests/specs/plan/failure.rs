// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failed runs exit 1, leave history alone, and email the reason.

use crate::prelude::*;

fn failure_mail(kitchen: &Kitchen) -> String {
    let mail = kitchen.sent_mail();
    assert_eq!(mail.len(), 1, "expected one failure email");
    assert!(
        mail[0].contains("Subject: Weekly meal planner failed (2026-10-19)\n"),
        "mail: {}",
        mail[0]
    );
    mail[0].clone()
}

#[test]
fn claude_nonzero_exit_reports_stderr() {
    let kitchen = Kitchen::new();
    kitchen.claude_runs("echo 'budget exceeded' >&2\nexit 1");

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).fails();

    assert!(kitchen.history().is_empty());
    let mail = failure_mail(&kitchen);
    assert!(mail.contains("exited with code 1"));
    assert!(mail.contains("budget exceeded"));
}

#[test]
fn claude_timeout_is_reported() {
    let kitchen = Kitchen::new();
    kitchen.claude_runs("sleep 5");

    kitchen
        .mp()
        .env("MP_CLAUDE_TIMEOUT_MS", "200")
        .args(&["plan", "--date", PLAN_DATE])
        .fails();

    assert!(kitchen.history().is_empty());
    assert!(failure_mail(&kitchen).contains("timed out after 200ms"));
}

#[test]
fn missing_structured_output_is_reported() {
    let kitchen = Kitchen::new();
    kitchen.claude_prints(r#"{"type": "result", "subtype": "error_max_budget_usd"}"#);

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).fails();

    assert!(kitchen.history().is_empty());
    assert!(failure_mail(&kitchen).contains("no structured_output"));
}

#[test]
fn all_invalid_meals_is_a_failure() {
    let kitchen = Kitchen::new();
    kitchen.claude_prints(
        r#"{"structured_output": {"meals": [{"recipe_name": "Mystery", "source": "cookbook", "url": ""}]}}"#,
    );

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).fails();

    assert!(kitchen.history().is_empty());
    assert!(failure_mail(&kitchen).contains("no valid meals"));
}

#[test]
fn missing_claude_binary_is_reported() {
    let kitchen = Kitchen::new();

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).fails();

    assert!(failure_mail(&kitchen).contains("failed to launch"));
}
