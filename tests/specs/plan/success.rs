// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A successful weekly plan is recorded and mailed.

use crate::prelude::*;

#[test]
fn plan_records_history_and_sends_email() {
    let kitchen = Kitchen::new();
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).passes();

    let history = kitchen.history();
    let lines: Vec<&str> = history.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 5, "history: {history:?}");
    assert_eq!(lines[0], "date,source,recipe_name,url");
    assert_eq!(
        lines[1],
        "2026-10-19,notion,Lentil Soup,https://notion.so/lentil"
    );
    assert_eq!(
        lines[4],
        "2026-10-19,web,\"Shakshuka, Green\",https://example.com/shakshuka"
    );

    let mail = kitchen.sent_mail();
    assert_eq!(mail.len(), 1);
    assert!(mail[0].contains("Subject: Meal Plan for Week of 2026-10-19\n"));
    assert!(mail[0].contains("To: cook@example.com\n"));
    assert!(mail[0].contains("1. Lentil Soup (notion)"));
    assert!(mail[0].contains("https://example.com/shakshuka"));
}

#[test]
fn plan_invokes_claude_non_interactively() {
    let kitchen = Kitchen::new();
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).passes();

    let args = kitchen.claude_args();
    assert!(args.starts_with("-p\n"), "args: {args}");
    assert!(args.contains("--output-format\njson\n"));
    assert!(args.contains("--json-schema\n"));
    assert!(args.contains("--no-session-persistence\n"));
}

#[test]
fn plan_writes_a_run_log() {
    let kitchen = Kitchen::new();
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).passes();

    let logs = kitchen.logs();
    assert_eq!(logs.len(), 1, "logs: {logs:?}");
    assert!(logs[0].starts_with("meal_planner_"));
    assert!(logs[0].ends_with(".log"));
}

#[test]
fn plan_accepts_meals_in_a_result_string() {
    let kitchen = Kitchen::new();
    kitchen.claude_prints(
        r#"{"type": "result", "result": "{\"meals\": [
            {\"recipe_name\": \"Dal\", \"source\": \"notion\", \"url\": \"https://notion.so/dal\"},
            {\"recipe_name\": \"Chili\", \"source\": \"notion\", \"url\": \"https://notion.so/chili\"},
            {\"recipe_name\": \"Pho\", \"source\": \"notion\", \"url\": \"https://notion.so/pho\"},
            {\"recipe_name\": \"Tacos\", \"source\": \"web\", \"url\": \"https://example.com/tacos\"}
        ]}"}"#,
    );

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).passes();

    assert!(kitchen.history().contains("2026-10-19,web,Tacos,https://example.com/tacos"));
    assert_eq!(kitchen.sent_mail().len(), 1);
}

#[test]
fn plan_excludes_recent_recipes() {
    let kitchen = Kitchen::new();
    kitchen.write_history(
        "date,source,recipe_name,url\r\n\
         2026-10-12,notion,Old Favorite,https://notion.so/old\r\n\
         2026-01-05,notion,Long Forgotten,https://notion.so/forgotten\r\n",
    );
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).passes();

    let args = kitchen.claude_args();
    assert!(args.contains("- Old Favorite"), "args: {args}");
    assert!(!args.contains("Long Forgotten"));
    assert!(kitchen.history().starts_with("date,source,recipe_name,url\r\n2026-10-12"));
}

#[test]
fn plan_uses_ingredient_requests_from_the_inbox() {
    let kitchen = Kitchen::new();
    kitchen.with_inbox();
    kitchen.deliver("1.msg", "use the leftover squash", "");
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).passes();

    assert!(kitchen.claude_args().contains("use the leftover squash"));
    assert_eq!(kitchen.sent_mail().len(), 1);
}

#[test]
fn plan_with_mail_disabled_still_records_history() {
    let kitchen = Kitchen::new();
    std::fs::write(
        kitchen.path().join("config.toml"),
        std::fs::read_to_string(kitchen.path().join("config.toml"))
            .unwrap()
            .replace("[mail]\n", "[mail]\nenabled = false\n"),
    )
    .unwrap();
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["plan", "--date", PLAN_DATE]).passes();

    assert!(kitchen.history().contains("Lentil Soup"));
    assert!(kitchen.sent_mail().is_empty());
}
