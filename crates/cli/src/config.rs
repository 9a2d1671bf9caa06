// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Planner configuration.
//!
//! Read from TOML at `$MP_CONFIG`, else `<state_dir>/config.toml`. A
//! missing default file means all defaults. Data paths may be relative to
//! the state directory; executables may use `~/` but are otherwise taken
//! as given so a bare name is looked up on `PATH`.

use crate::env;
use mp_core::MealCounts;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PREFLIGHT_HOST: &str = "api.anthropic.com:443";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine state directory: set MP_STATE_DIR or HOME")]
    NoStateDir,
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Resolved configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub state_dir: PathBuf,
    pub history_path: PathBuf,
    pub log_dir: PathBuf,
    pub exclusion_weeks: u32,
    pub meals: MealCounts,
    pub claude: ClaudeSettings,
    pub mail: MailSettings,
    pub inbox: InboxSettings,
    pub notify: NotifySettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClaudeSettings {
    pub bin: PathBuf,
    pub timeout: Duration,
    pub grace: Duration,
    pub max_budget_usd: String,
    pub mcp_config: PathBuf,
    /// `None` skips the network preflight
    pub preflight_host: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailSettings {
    pub enabled: bool,
    pub sender: String,
    pub recipients: Vec<String>,
    pub sendmail: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InboxSettings {
    /// `None` disables reading mail
    pub maildir: Option<PathBuf>,
    pub authorized_senders: Vec<String>,
    pub ingredient_keyword: String,
    pub reply_subject_prefix: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotifySettings {
    pub desktop: bool,
}

// --- File format ---

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    history_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    exclusion_weeks: Option<u32>,
    meals: MealCounts,
    claude: ClaudeSection,
    mail: MailSection,
    inbox: InboxSection,
    notify: NotifySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ClaudeSection {
    bin: Option<PathBuf>,
    timeout_secs: Option<u64>,
    grace_ms: Option<u64>,
    max_budget_usd: Option<String>,
    mcp_config: Option<PathBuf>,
    preflight_host: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MailSection {
    enabled: Option<bool>,
    sender: String,
    recipients: Vec<String>,
    sendmail: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct InboxSection {
    maildir: Option<PathBuf>,
    authorized_senders: Vec<String>,
    ingredient_keyword: Option<String>,
    reply_subject_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct NotifySection {
    desktop: Option<bool>,
}

impl Config {
    /// Load configuration for this user, applying environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let state_dir = env::state_dir()?;
        let (path, required) = match env::config_path() {
            Some(path) => (path, true),
            None => (state_dir.join("config.toml"), false),
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => String::new(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let mut config = Self::parse(&text, &path, state_dir, env::home_dir().as_deref())?;
        if let Some(bin) = env::claude_bin() {
            config.claude.bin = bin;
        }
        if let Some(timeout) = env::claude_timeout_ms() {
            config.claude.timeout = timeout;
        }
        Ok(config)
    }

    /// Parse and resolve `text` read from `path`.
    pub fn parse(
        text: &str,
        path: &Path,
        state_dir: PathBuf,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let resolve = |p: PathBuf| resolve_path(p, &state_dir, home);
        let local_bin = home
            .map(|h| h.join(".local/bin/claude"))
            .unwrap_or_else(|| PathBuf::from("claude"));

        let config = Self {
            history_path: resolve(
                file.history_path
                    .unwrap_or_else(|| PathBuf::from("meal_history.csv")),
            ),
            log_dir: resolve(file.log_dir.unwrap_or_else(|| PathBuf::from("logs"))),
            exclusion_weeks: file.exclusion_weeks.unwrap_or(6),
            meals: file.meals,
            claude: ClaudeSettings {
                bin: file
                    .claude
                    .bin
                    .map(|p| expand_home(p, home))
                    .unwrap_or(local_bin),
                timeout: file
                    .claude
                    .timeout_secs
                    .map_or(mp_adapters::claude::DEFAULT_TIMEOUT, Duration::from_secs),
                grace: file
                    .claude
                    .grace_ms
                    .map_or(mp_adapters::claude::DEFAULT_GRACE, Duration::from_millis),
                max_budget_usd: file
                    .claude
                    .max_budget_usd
                    .unwrap_or_else(|| "1.00".to_string()),
                mcp_config: resolve(
                    file.claude
                        .mcp_config
                        .unwrap_or_else(|| PathBuf::from("mcp_config.json")),
                ),
                preflight_host: match file.claude.preflight_host {
                    Some(host) if host.trim().is_empty() => None,
                    Some(host) => Some(host),
                    None => Some(DEFAULT_PREFLIGHT_HOST.to_string()),
                },
            },
            mail: MailSettings {
                enabled: file.mail.enabled.unwrap_or(true),
                sender: file.mail.sender,
                recipients: file.mail.recipients,
                sendmail: file
                    .mail
                    .sendmail
                    .map(|p| expand_home(p, home))
                    .unwrap_or_else(|| PathBuf::from("/usr/sbin/sendmail")),
            },
            inbox: InboxSettings {
                maildir: file.inbox.maildir.map(&resolve),
                authorized_senders: file.inbox.authorized_senders,
                ingredient_keyword: file
                    .inbox
                    .ingredient_keyword
                    .unwrap_or_else(|| "use".to_string()),
                reply_subject_prefix: file
                    .inbox
                    .reply_subject_prefix
                    .unwrap_or_else(|| "Re: Meal".to_string()),
            },
            notify: NotifySettings {
                desktop: file.notify.desktop.unwrap_or(true),
            },
            state_dir,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let meals = &self.meals;
        if meals.total == 0 {
            return Err(ConfigError::Invalid("meals.total must be at least 1".into()));
        }
        if meals.notion + meals.web != meals.total {
            return Err(ConfigError::Invalid(format!(
                "meals.notion ({}) + meals.web ({}) must equal meals.total ({})",
                meals.notion, meals.web, meals.total
            )));
        }
        if self.mail.enabled {
            if self.mail.sender.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "mail.sender is required when mail is enabled".into(),
                ));
            }
            if self.mail.recipients.is_empty() {
                return Err(ConfigError::Invalid(
                    "mail.recipients is required when mail is enabled".into(),
                ));
            }
        }
        if self.inbox.maildir.is_some() && self.inbox.authorized_senders.is_empty() {
            return Err(ConfigError::Invalid(
                "inbox.authorized_senders is required when inbox.maildir is set".into(),
            ));
        }
        Ok(())
    }
}

/// Expand a leading `~` to `home`; other paths are returned unchanged.
fn expand_home(path: PathBuf, home: Option<&Path>) -> PathBuf {
    if let (Ok(rest), Some(home)) = (path.strip_prefix("~"), home) {
        return home.join(rest);
    }
    path
}

/// Expand `~`, then anchor relative paths at the state directory.
fn resolve_path(path: PathBuf, state_dir: &Path, home: Option<&Path>) -> PathBuf {
    let path = expand_home(path, home);
    if path.is_relative() {
        state_dir.join(path)
    } else {
        path
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
