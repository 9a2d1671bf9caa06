// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child environment for the Claude CLI

use std::path::Path;

/// Set by the Claude CLI in its own children. Left in place, a nested
/// `claude` believes it runs inside a parent session and changes behavior.
pub const NESTED_SESSION_VAR: &str = "CLAUDECODE";

/// System directories that must be searchable, highest priority first.
///
/// `~/.local/bin` (the CLI's install location) is prepended at build time.
const SYSTEM_PATHS: &[&str] = &[
    "/opt/homebrew/bin",
    "/opt/homebrew/sbin",
    "/usr/local/bin",
    "/usr/bin",
    "/bin",
    "/usr/sbin",
    "/sbin",
];

/// Directories required on `PATH`, highest priority first.
pub fn required_paths(home: Option<&Path>) -> Vec<String> {
    let mut paths = Vec::with_capacity(SYSTEM_PATHS.len() + 1);
    if let Some(home) = home {
        paths.push(home.join(".local").join("bin").display().to_string());
    }
    paths.extend(SYSTEM_PATHS.iter().map(|p| p.to_string()));
    paths
}

/// Merge `required` into a colon-separated search path.
///
/// Entries already present keep their position. Missing entries are
/// prepended in `required` order, so earlier entries win lookups.
/// Empty segments are dropped since they mean "current directory".
pub fn merge_search_path(existing: &str, required: &[String]) -> String {
    let mut entries: Vec<&str> = existing.split(':').filter(|s| !s.is_empty()).collect();
    let missing: Vec<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|p| !entries.contains(p))
        .collect();
    entries.splice(0..0, missing);
    entries.join(":")
}

/// Build the environment for a Claude CLI child process.
///
/// Pure: derives the result from `inherited` alone. `PATH` is extended
/// with [`required_paths`] and [`NESTED_SESSION_VAR`] is removed.
pub fn claude_env<I>(inherited: I, home: Option<&Path>) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut env: Vec<(String, String)> = inherited
        .into_iter()
        .filter(|(key, _)| key != NESTED_SESSION_VAR)
        .collect();

    let required = required_paths(home);
    match env.iter_mut().find(|(key, _)| key == "PATH") {
        Some((_, path)) => *path = merge_search_path(path, &required),
        None => env.push(("PATH".to_string(), merge_search_path("", &required))),
    }
    env
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
