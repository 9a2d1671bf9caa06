// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

// --- Duration helper (private) ---

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

// --- State directory ---

/// Resolve state directory: MP_STATE_DIR > XDG_STATE_HOME/mp > ~/.local/state/mp
pub fn state_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(dir) = std::env::var("MP_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("mp"));
    }
    let home = home_dir().ok_or(ConfigError::NoStateDir)?;
    Ok(home.join(".local/state/mp"))
}

pub fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

// --- Config file ---

pub fn config_path() -> Option<PathBuf> {
    std::env::var("MP_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// --- Claude overrides ---

pub fn claude_bin() -> Option<PathBuf> {
    std::env::var("MP_CLAUDE_BIN")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

pub fn claude_timeout_ms() -> Option<Duration> {
    parse_duration_ms("MP_CLAUDE_TIMEOUT_MS")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
