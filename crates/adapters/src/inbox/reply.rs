// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reply body cleanup

use regex::Regex;
use std::sync::LazyLock;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static ATTRIBUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^On .+ wrote:$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static ORIGINAL_DIVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^-+\s*Original Message").expect("constant regex pattern is valid")
});

/// Keep only what the sender wrote above the quoted original message.
///
/// Stops at an `On ... wrote:` attribution, an `--- Original Message`
/// divider, or the first `>` line, then trims.
pub fn strip_quoted_text(body: &str) -> String {
    let kept: Vec<&str> = body
        .lines()
        .take_while(|line| {
            !(ATTRIBUTION.is_match(line) || ORIGINAL_DIVIDER.is_match(line) || line.starts_with('>'))
        })
        .collect();
    kept.join("\n").trim().to_string()
}

#[cfg(test)]
#[path = "reply_tests.rs"]
mod tests;
