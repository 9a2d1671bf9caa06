// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Meal validation
//!
//! Checks a selected meal list against the expected plan shape. Count
//! mismatches and malformed records are reported as warnings; validation
//! itself never fails. Whether an empty result is acceptable is up to the
//! caller.

use crate::meal::{Meal, MealCounts, MealSource};
use serde_json::Value;
use std::fmt;

/// Which count a mismatch refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountGroup {
    Total,
    Source(MealSource),
}

impl fmt::Display for CountGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountGroup::Total => f.write_str("total"),
            CountGroup::Source(MealSource::Notion) => f.write_str("Notion"),
            CountGroup::Source(MealSource::Web) => f.write_str("web"),
        }
    }
}

/// Non-fatal problem found while validating a meal list.
#[derive(Debug, Clone, PartialEq)]
pub enum MealWarning {
    CountMismatch {
        group: CountGroup,
        expected: usize,
        actual: usize,
    },
    /// Record dropped because a required field is missing or mistyped.
    MissingFields { record: Value },
}

impl fmt::Display for MealWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealWarning::CountMismatch {
                group,
                expected,
                actual,
            } => write!(f, "expected {} {} meals, got {}", expected, group, actual),
            MealWarning::MissingFields { record } => {
                write!(f, "skipping meal with missing fields: {}", record)
            }
        }
    }
}

/// Meals that passed validation plus everything worth warning about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedMeals {
    pub meals: Vec<Meal>,
    pub warnings: Vec<MealWarning>,
}

/// Validate raw meal records against the expected counts.
///
/// Counts are taken over the input as received, partitioned on the
/// `source` field. Records missing `recipe_name`, `source` or `url` are
/// dropped individually.
pub fn validate_meals(records: &[Value], expected: &MealCounts) -> ValidatedMeals {
    let mut warnings = Vec::new();

    let source_count = |source: MealSource| {
        records
            .iter()
            .filter(|r| r.get("source").and_then(Value::as_str) == Some(source.as_str()))
            .count()
    };

    let checks = [
        (CountGroup::Total, expected.total, records.len()),
        (
            CountGroup::Source(MealSource::Notion),
            expected.notion,
            source_count(MealSource::Notion),
        ),
        (
            CountGroup::Source(MealSource::Web),
            expected.web,
            source_count(MealSource::Web),
        ),
    ];
    for (group, expected, actual) in checks {
        if expected != actual {
            warnings.push(MealWarning::CountMismatch {
                group,
                expected,
                actual,
            });
        }
    }

    let mut meals = Vec::with_capacity(records.len());
    for record in records {
        match Meal::from_value(record) {
            Some(meal) => meals.push(meal),
            None => warnings.push(MealWarning::MissingFields {
                record: record.clone(),
            }),
        }
    }

    ValidatedMeals { meals, warnings }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
