// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup: stdout plus one log file per run.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;

/// `<log_dir>/<command>_<YYYYmmdd_HHMMSS>.log`
pub fn run_log_path(log_dir: &Path, command: &str, started: NaiveDateTime) -> PathBuf {
    log_dir.join(format!("{}_{}.log", command, started.format("%Y%m%d_%H%M%S")))
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must outlive
/// every log call.
pub fn setup_logging(
    log_dir: &Path,
    command: &str,
    started: NaiveDateTime,
) -> std::io::Result<(PathBuf, WorkerGuard)> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(log_dir)?;
    let log_path = run_log_path(log_dir, command, started);
    let file_name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok((log_path, guard))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
