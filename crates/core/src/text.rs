// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic text helpers: bounded snippets and short durations.

use std::time::Duration;

/// Bounded views of a string that never split a UTF-8 character.
pub trait Truncate {
    /// Returns at most the first `n` bytes, backed off to a char boundary.
    fn head(&self, n: usize) -> &str;

    /// Returns at most the last `n` bytes, advanced to a char boundary.
    fn tail(&self, n: usize) -> &str;
}

impl Truncate for str {
    fn head(&self, n: usize) -> &str {
        if self.len() <= n {
            return self;
        }
        let mut end = n;
        while !self.is_char_boundary(end) {
            end -= 1;
        }
        &self[..end]
    }

    fn tail(&self, n: usize) -> &str {
        if self.len() <= n {
            return self;
        }
        let mut start = self.len() - n;
        while !self.is_char_boundary(start) {
            start += 1;
        }
        &self[start..]
    }
}

/// Format a duration as `"250ms"`, `"5s"`, `"15m"`, `"1h30m"`.
///
/// Sub-second durations keep millisecond precision so short test timeouts
/// stay readable in error messages.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs == 0 {
        return format!("{}ms", d.as_millis());
    }
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        let m = secs / 60;
        let s = secs % 60;
        if s > 0 {
            format!("{}m{}s", m, s)
        } else {
            format!("{}m", m)
        }
    } else {
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        if m > 0 {
            format!("{}h{}m", h, m)
        } else {
            format!("{}h", h)
        }
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
