// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Meal planner flows: weekly plan and reply-driven regeneration

mod error;
pub mod message;
mod planner;
pub mod prompt;
mod regenerate;

#[cfg(test)]
mod test_helpers;

pub use error::PlannerError;
pub use message::Envelope;
pub use planner::{Planner, PlannerConfig, PlannerDeps, FAILURE_NOTIFICATION_TITLE};
pub use prompt::{build_prompt, build_regeneration_prompt, MEAL_SCHEMA};
pub use regenerate::RegenerateOutcome;
