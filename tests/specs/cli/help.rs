// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and argument parsing.

use crate::prelude::*;

#[test]
fn help_lists_both_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("plan")
        .stdout_has("regenerate")
        .stdout_has("--date");
}

#[test]
fn missing_command_is_a_usage_error() {
    cli().exits(2).stderr_has("Usage");
}

#[test]
fn malformed_date_is_a_usage_error() {
    let kitchen = Kitchen::new();
    kitchen
        .mp()
        .args(&["plan", "--date", "next-monday"])
        .exits(2)
        .stderr_has("--date");
    assert!(kitchen.sent_mail().is_empty());
}
