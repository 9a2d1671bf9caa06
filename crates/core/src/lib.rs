// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mp-core: meal types and validation shared by the meal planner crates

pub mod meal;
pub mod text;
pub mod validate;

pub use meal::{Meal, MealCounts, MealSource, ParseSourceError};
pub use text::{format_duration, Truncate};
pub use validate::{validate_meals, CountGroup, MealWarning, ValidatedMeals};
