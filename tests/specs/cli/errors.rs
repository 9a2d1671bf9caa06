// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Setup failures exit 1 before any work is done.

use crate::prelude::*;

#[test]
fn unknown_config_key_is_rejected() {
    let kitchen = Kitchen::new();
    kitchen.config("\n[oven]\ntemperature = 180\n");
    kitchen.claude_prints(FOUR_MEALS);

    kitchen
        .mp()
        .args(&["plan"])
        .fails()
        .stderr_has("invalid config");
    assert!(kitchen.history().is_empty());
    assert!(kitchen.sent_mail().is_empty());
}

#[test]
fn inconsistent_meal_counts_are_rejected() {
    let kitchen = Kitchen::new();
    kitchen.config("\n[meals]\ntotal = 4\nnotion = 1\nweb = 1\n");

    kitchen.mp().args(&["regenerate"]).fails().stderr_has("Error:");
}

#[test]
fn explicit_config_path_must_exist() {
    let kitchen = Kitchen::new();
    kitchen
        .mp()
        .env("MP_CONFIG", kitchen.path().join("missing.toml"))
        .args(&["plan"])
        .fails()
        .stderr_has("missing.toml");
}
