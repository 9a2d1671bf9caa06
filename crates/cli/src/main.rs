// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! mp - weekly meal planner CLI

mod adapters;
mod config;
mod env;
mod logging;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use mp_engine::RegenerateOutcome;
use tracing::{error, info};

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "mp",
    version,
    about = "Weekly meal planner - picks recipes with the claude CLI and emails the plan"
)]
struct Cli {
    /// Plan date (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Select this week's meals, record them, and email the plan
    Plan,
    /// Revise the latest plan from unread email replies (cron-safe)
    Regenerate,
}

impl Commands {
    /// Prefix of the per-run log file
    fn log_name(self) -> &'static str {
        match self {
            Commands::Plan => "meal_planner",
            Commands::Regenerate => "meal_regenerator",
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            1
        }
    };
    std::process::exit(code);
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, skip
/// the "Caused by" chain; otherwise render the full chain.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

/// Run one command, returning the process exit code.
///
/// Only setup problems surface as `Err`; flow failures are logged (and
/// for `plan`, reported) and mapped to an exit code here.
async fn run(cli: Cli) -> Result<i32> {
    let config = Config::load()?;
    let started = Local::now().naive_local();
    let (log_path, _guard) = logging::setup_logging(&config.log_dir, cli.command.log_name(), started)
        .with_context(|| format!("cannot set up logging in {}", config.log_dir.display()))?;
    info!(log = %log_path.display(), "logging to file");

    let today = cli.date.unwrap_or_else(|| started.date());
    let planner = adapters::build_planner(&config);

    let code = match cli.command {
        Commands::Plan => match planner.run_plan(today).await {
            Ok(_) => 0,
            Err(_) => 1,
        },
        Commands::Regenerate => {
            info!("checking for meal plan replies");
            match planner.regenerate(today).await {
                Ok(RegenerateOutcome::Revised { date, meals }) => {
                    info!(%date, count = meals.len(), "meal plan revised");
                }
                Ok(outcome) => info!(?outcome, "nothing regenerated"),
                Err(e) => error!(error = %e, "meal regeneration failed"),
            }
            info!("meal regenerator finished");
            0
        }
    };
    Ok(code)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
