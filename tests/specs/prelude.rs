//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running `mp` against an isolated state dir.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Date passed via `--date` so history rows and subjects are stable.
pub const PLAN_DATE: &str = "2026-10-19";

/// Envelope with a valid four-meal structured output.
pub const FOUR_MEALS: &str = r#"{
  "type": "result",
  "subtype": "success",
  "is_error": false,
  "structured_output": {
    "meals": [
      {"recipe_name": "Lentil Soup", "source": "notion", "url": "https://notion.so/lentil"},
      {"recipe_name": "White Bean Salad", "source": "notion", "url": "https://notion.so/beans"},
      {"recipe_name": "Sheet Pan Salmon", "source": "notion", "url": "https://notion.so/salmon"},
      {"recipe_name": "Shakshuka, Green", "source": "web", "url": "https://example.com/shakshuka"}
    ]
  }
}"#;

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

fn write_script(path: &Path, body: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

// =============================================================================
// Kitchen: an isolated state directory
// =============================================================================

/// Isolated state directory with fake external tools.
pub struct Kitchen {
    state: tempfile::TempDir,
}

impl Kitchen {
    /// State dir with a config that sends mail through the fake sendmail,
    /// skips the network preflight, and has no desktop notifications.
    pub fn new() -> Self {
        let kitchen = Self {
            state: tempfile::tempdir().unwrap(),
        };
        std::fs::create_dir_all(kitchen.outbox()).unwrap();
        let outbox = kitchen.outbox();
        write_script(
            &kitchen.path().join("bin/sendmail"),
            &format!(
                "n=$(ls '{0}' | wc -l | tr -d ' ')\ncat > '{0}'/$n.eml",
                outbox.display()
            ),
        );
        kitchen.config("");
        kitchen
    }

    pub fn path(&self) -> &Path {
        self.state.path()
    }

    fn outbox(&self) -> PathBuf {
        self.path().join("outbox")
    }

    pub fn maildir(&self) -> PathBuf {
        self.path().join("Mail")
    }

    /// Write config.toml; `extra` is appended as additional sections.
    pub fn config(&self, extra: &str) {
        let text = format!(
            "[claude]\n\
             bin = \"{bin}\"\n\
             preflight_host = \"\"\n\
             \n\
             [mail]\n\
             sender = \"planner@example.com\"\n\
             recipients = [\"cook@example.com\"]\n\
             sendmail = \"{sendmail}\"\n\
             \n\
             [notify]\n\
             desktop = false\n\
             {extra}",
            bin = self.path().join("bin/claude").display(),
            sendmail = self.path().join("bin/sendmail").display(),
        );
        std::fs::write(self.path().join("config.toml"), text).unwrap();
    }

    /// Enable the maildir inbox for `cook@example.com`.
    pub fn with_inbox(&self) {
        for sub in ["new", "cur", "tmp"] {
            std::fs::create_dir_all(self.maildir().join(sub)).unwrap();
        }
        self.config(
            "\n[inbox]\nmaildir = \"Mail\"\nauthorized_senders = [\"cook@example.com\"]\n",
        );
    }

    /// Drop a message from the cook into the maildir.
    pub fn deliver(&self, name: &str, subject: &str, body: &str) {
        let raw = format!(
            "From: Cook <cook@example.com>\nTo: planner@example.com\nSubject: {}\n\n{}",
            subject, body
        );
        std::fs::write(self.maildir().join("new").join(name), raw).unwrap();
    }

    /// Fake claude that records its arguments and prints `envelope`.
    pub fn claude_prints(&self, envelope: &str) {
        self.claude_runs(&format!(
            "printf '%s\\n' \"$@\" > '{}'\ncat <<'JSON'\n{}\nJSON",
            self.path().join("claude_args").display(),
            envelope
        ));
    }

    /// Fake claude running an arbitrary shell body.
    pub fn claude_runs(&self, body: &str) {
        write_script(&self.path().join("bin/claude"), body);
    }

    /// Arguments the fake claude was last called with, one per line.
    pub fn claude_args(&self) -> String {
        std::fs::read_to_string(self.path().join("claude_args")).unwrap_or_default()
    }

    /// Sent messages in send order.
    pub fn sent_mail(&self) -> Vec<String> {
        let mut files: Vec<_> = std::fs::read_dir(self.outbox())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        files.sort_by_key(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u32>().ok())
        });
        files
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect()
    }

    pub fn history(&self) -> String {
        std::fs::read_to_string(self.path().join("meal_history.csv")).unwrap_or_default()
    }

    pub fn write_history(&self, text: &str) {
        std::fs::write(self.path().join("meal_history.csv"), text).unwrap();
    }

    /// Names of run log files.
    pub fn logs(&self) -> Vec<String> {
        match std::fs::read_dir(self.path().join("logs")) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Builder for an `mp` invocation against this state dir.
    pub fn mp(&self) -> CliBuilder {
        CliBuilder::new()
            .env("MP_STATE_DIR", self.path())
            .env("HOME", self.path())
    }
}

// =============================================================================
// CLI builder
// =============================================================================

pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(binary_path("mp"));
        cmd.args(&self.args);

        // Keep the developer's setup out of the run
        for var in ["MP_CONFIG", "MP_CLAUDE_BIN", "MP_CLAUDE_TIMEOUT_MS", "RUST_LOG", "CLAUDECODE"] {
            cmd.env_remove(var);
        }

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and expect the given exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Run and expect failure (exit code 1)
    pub fn fails(self) -> RunAssert {
        self.exits(1)
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }
}
