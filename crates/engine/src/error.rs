// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the planner flows

use mp_adapters::{ClaudeError, MailError};
use mp_storage::HistoryError;
use thiserror::Error;

/// Errors that end a planner run
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Claude(#[from] ClaudeError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("could not send meal plan email: {0}")]
    Mail(#[from] MailError),
    #[error("no valid meals returned from claude")]
    NoValidMeals,
}
