// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Meal records and expected plan shape

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Where a recipe was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSource {
    Notion,
    Web,
}

impl MealSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSource::Notion => "notion",
            MealSource::Web => "web",
        }
    }
}

impl fmt::Display for MealSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown meal source: {0}")]
pub struct ParseSourceError(pub String);

impl FromStr for MealSource {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notion" => Ok(MealSource::Notion),
            "web" => Ok(MealSource::Web),
            other => Err(ParseSourceError(other.to_string())),
        }
    }
}

/// A selected recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub recipe_name: String,
    pub source: MealSource,
    pub url: String,
}

impl Meal {
    pub fn new(recipe_name: impl Into<String>, source: MealSource, url: impl Into<String>) -> Self {
        Self {
            recipe_name: recipe_name.into(),
            source,
            url: url.into(),
        }
    }

    /// Read a meal from a loosely-typed JSON record.
    ///
    /// Returns `None` unless the record is an object carrying string
    /// `recipe_name`, `source` and `url` fields with a known source.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let recipe_name = obj.get("recipe_name")?.as_str()?;
        let source = obj.get("source")?.as_str()?.parse().ok()?;
        let url = obj.get("url")?.as_str()?;
        Some(Self::new(recipe_name, source, url))
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "recipe_name": self.recipe_name,
            "source": self.source.as_str(),
            "url": self.url,
        })
    }
}

/// Expected number of meals per weekly plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MealCounts {
    pub total: usize,
    pub notion: usize,
    pub web: usize,
}

impl Default for MealCounts {
    fn default() -> Self {
        Self {
            total: 4,
            notion: 3,
            web: 1,
        }
    }
}

impl MealCounts {
    /// Expected count for one source.
    pub fn for_source(&self, source: MealSource) -> usize {
        match source {
            MealSource::Notion => self.notion,
            MealSource::Web => self.web,
        }
    }
}

#[cfg(test)]
#[path = "meal_tests.rs"]
mod tests;
