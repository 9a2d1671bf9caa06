// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mp regenerate` revises the latest plan from email replies.
//!
//! Regeneration always exits 0 so cron does not mail on every quiet run.

use crate::prelude::*;

const CURRENT_PLAN: &str = "date,source,recipe_name,url\r\n\
    2026-10-12,notion,Lentil Soup,https://notion.so/lentil\r\n\
    2026-10-12,notion,Beet Salad,https://notion.so/beets\r\n\
    2026-10-12,notion,Fish Pie,https://notion.so/pie\r\n\
    2026-10-12,web,Tacos,https://example.com/tacos\r\n";

fn kitchen_with_plan() -> Kitchen {
    let kitchen = Kitchen::new();
    kitchen.with_inbox();
    kitchen.write_history(CURRENT_PLAN);
    kitchen
}

#[test]
fn no_replies_changes_nothing() {
    let kitchen = kitchen_with_plan();
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["regenerate", "--date", PLAN_DATE]).passes();

    similar_asserts::assert_eq!(kitchen.history(), CURRENT_PLAN);
    assert!(kitchen.sent_mail().is_empty());
    assert!(kitchen.claude_args().is_empty(), "claude should not run");
}

#[test]
fn reply_revises_the_latest_plan() {
    let kitchen = kitchen_with_plan();
    kitchen.deliver(
        "1.msg",
        "Re: Meal Plan for Week of 2026-10-12",
        "Swap the fish pie for something vegetarian\n\nOn Mon, Oct 12, Planner wrote:\n> 1. Lentil Soup",
    );
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["regenerate", "--date", PLAN_DATE]).passes();

    let args = kitchen.claude_args();
    assert!(args.contains("Swap the fish pie for something vegetarian"), "args: {args}");
    assert!(!args.contains("> 1. Lentil Soup"));

    let history = kitchen.history();
    assert!(!history.contains("Fish Pie"));
    assert!(history.contains("2026-10-12,web,\"Shakshuka, Green\""));

    let mail = kitchen.sent_mail();
    assert_eq!(mail.len(), 1);
    assert!(mail[0].contains("Subject: Meal Plan (Revised) for Week of 2026-10-12\n"));

    // Processed replies move to cur/ and are not read twice
    assert_eq!(std::fs::read_dir(kitchen.maildir().join("new")).unwrap().count(), 0);
    kitchen.mp().args(&["regenerate", "--date", PLAN_DATE]).passes();
    assert_eq!(kitchen.sent_mail().len(), 1);
}

#[test]
fn reply_from_a_stranger_is_ignored() {
    let kitchen = kitchen_with_plan();
    std::fs::write(
        kitchen.maildir().join("new/1.msg"),
        "From: someone@elsewhere.example\nSubject: Re: Meal Plan\n\nadd more bacon",
    )
    .unwrap();
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["regenerate", "--date", PLAN_DATE]).passes();

    similar_asserts::assert_eq!(kitchen.history(), CURRENT_PLAN);
    assert!(kitchen.sent_mail().is_empty());
}

#[test]
fn claude_failure_keeps_the_plan_and_exits_zero() {
    let kitchen = kitchen_with_plan();
    kitchen.deliver("1.msg", "Re: Meal Plan for Week of 2026-10-12", "more soup please");
    kitchen.claude_runs("exit 1");

    kitchen.mp().args(&["regenerate", "--date", PLAN_DATE]).passes();

    similar_asserts::assert_eq!(kitchen.history(), CURRENT_PLAN);
    assert!(kitchen.sent_mail().is_empty());
}

#[test]
fn reply_without_history_is_skipped() {
    let kitchen = Kitchen::new();
    kitchen.with_inbox();
    kitchen.deliver("1.msg", "Re: Meal Plan", "more soup please");
    kitchen.claude_prints(FOUR_MEALS);

    kitchen.mp().args(&["regenerate", "--date", PLAN_DATE]).passes();

    assert!(kitchen.history().is_empty());
    assert!(kitchen.sent_mail().is_empty());
}
