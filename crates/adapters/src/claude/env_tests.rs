// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::PathBuf;

fn var(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

fn path_of(env: &[(String, String)]) -> &str {
    env.iter()
        .find(|(k, _)| k == "PATH")
        .map(|(_, v)| v.as_str())
        .unwrap()
}

#[test]
fn required_paths_start_with_user_local_bin() {
    let home = PathBuf::from("/home/cook");
    let paths = required_paths(Some(&home));
    assert_eq!(paths[0], "/home/cook/.local/bin");
    assert_eq!(paths[1], "/opt/homebrew/bin");
    assert_eq!(paths.last().map(String::as_str), Some("/sbin"));
}

#[test]
fn required_paths_without_home_skip_user_dir() {
    let paths = required_paths(None);
    assert_eq!(paths.len(), SYSTEM_PATHS.len());
    assert_eq!(paths[0], "/opt/homebrew/bin");
}

#[test]
fn missing_entries_are_prepended_in_priority_order() {
    let required = vec!["/a".to_string(), "/b".to_string()];
    assert_eq!(merge_search_path("/x:/y", &required), "/a:/b:/x:/y");
}

#[test]
fn present_entries_keep_their_position() {
    let required = vec!["/a".to_string(), "/b".to_string()];
    assert_eq!(merge_search_path("/x:/b", &required), "/a:/x:/b");
}

#[test]
fn each_entry_is_inserted_at_most_once() {
    let required = vec!["/a".to_string(), "/b".to_string()];
    let once = merge_search_path("/x", &required);
    let twice = merge_search_path(&once, &required);
    assert_eq!(once, twice);
    assert_eq!(twice.matches("/a").count(), 1);
}

#[yare::parameterized(
    empty         = { "",       "/a" },
    leading_colon = { ":/x",    "/a:/x" },
    trailing      = { "/x:",    "/a:/x" },
    double_colon  = { "/x::/y", "/a:/x:/y" },
)]
fn empty_segments_are_dropped(existing: &str, expected: &str) {
    let required = vec!["/a".to_string()];
    assert_eq!(merge_search_path(existing, &required), expected);
}

#[test]
fn claude_env_strips_nested_session_marker() {
    let env = claude_env(
        vec![var("CLAUDECODE", "1"), var("HOME", "/home/cook"), var("PATH", "/usr/bin")],
        None,
    );
    assert!(env.iter().all(|(k, _)| k != NESTED_SESSION_VAR));
    assert!(env.contains(&var("HOME", "/home/cook")));
}

#[test]
fn claude_env_extends_existing_path() {
    let home = PathBuf::from("/home/cook");
    let env = claude_env(vec![var("PATH", "/usr/bin:/custom")], Some(&home));
    let path = path_of(&env);

    assert!(path.starts_with("/home/cook/.local/bin:/opt/homebrew/bin:"));
    // /usr/bin was already present and keeps its place ahead of /custom
    assert!(path.ends_with(":/usr/bin:/custom"), "got {path}");
    assert_eq!(path.split(':').filter(|p| *p == "/usr/bin").count(), 1);
}

#[test]
fn claude_env_adds_path_when_missing() {
    let env = claude_env(vec![var("LANG", "C")], None);
    assert_eq!(path_of(&env), SYSTEM_PATHS.join(":"));
}

#[test]
fn claude_env_preserves_unrelated_variables_in_order() {
    let env = claude_env(vec![var("A", "1"), var("B", "2"), var("PATH", "/bin")], None);
    assert_eq!(env[0], var("A", "1"));
    assert_eq!(env[1], var("B", "2"));
}
