// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Meal history stored as CSV.
//!
//! One row per selected meal: `date,source,recipe_name,url`. The file is
//! append-only except for [`MealHistory::replace`], which rewrites it
//! atomically.

use crate::csv;
use chrono::{Days, NaiveDate};
use mp_core::Meal;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Column names, in file order.
pub const HEADER: [&str; 4] = ["date", "source", "recipe_name", "url"];

/// Date format used in the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from history file operations
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot access meal history {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One row of the history file, as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryRow {
    pub date: String,
    pub source: String,
    pub recipe_name: String,
    pub url: String,
}

impl HistoryRow {
    pub fn from_meal(meal: &Meal, date: NaiveDate) -> Self {
        Self {
            date: format_date(date),
            source: meal.source.as_str().to_string(),
            recipe_name: meal.recipe_name.clone(),
            url: meal.url.clone(),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// The row as a meal, if its source is one we know.
    pub fn meal(&self) -> Option<Meal> {
        let source = self.source.trim().parse().ok()?;
        Some(Meal::new(&self.recipe_name, source, &self.url))
    }

    fn write_to(&self, out: &mut String) {
        csv::write_record(
            out,
            &[
                self.date.as_str(),
                self.source.as_str(),
                self.recipe_name.as_str(),
                self.url.as_str(),
            ],
        );
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Handle to the history CSV at a fixed path.
#[derive(Debug, Clone)]
pub struct MealHistory {
    path: PathBuf,
}

impl MealHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows, in file order. A missing file has no rows.
    ///
    /// Columns are located by the header line, so files with extra or
    /// reordered columns still read; absent columns read as empty.
    pub fn rows(&self) -> Result<Vec<HistoryRow>, HistoryError> {
        let text = match fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut records = csv::parse(&text).into_iter();
        let Some(header) = records.next() else {
            return Ok(Vec::new());
        };
        let column = |name: &str| header.iter().position(|h| h.trim() == name);
        let columns = HEADER.map(column);
        let field = |record: &[String], col: Option<usize>| {
            col.and_then(|i| record.get(i)).cloned().unwrap_or_default()
        };

        Ok(records
            .map(|record| HistoryRow {
                date: field(&record, columns[0]),
                source: field(&record, columns[1]),
                recipe_name: field(&record, columns[2]),
                url: field(&record, columns[3]),
            })
            .collect())
    }

    /// Names of recipes served on or after `today - weeks`.
    ///
    /// Rows whose date does not parse are skipped.
    pub fn recent_recipes(
        &self,
        weeks: u32,
        today: NaiveDate,
    ) -> Result<Vec<String>, HistoryError> {
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(weeks) * 7))
            .unwrap_or(NaiveDate::MIN);
        Ok(self
            .rows()?
            .into_iter()
            .filter(|row| row.parsed_date().is_some_and(|d| d >= cutoff))
            .map(|row| row.recipe_name)
            .collect())
    }

    /// Meals planned for `date`, in file order.
    pub fn plan_for(&self, date: NaiveDate) -> Result<Vec<Meal>, HistoryError> {
        let mut meals = Vec::new();
        for row in self.rows()? {
            if row.parsed_date() != Some(date) {
                continue;
            }
            match row.meal() {
                Some(meal) => meals.push(meal),
                None => warn!(
                    recipe = %row.recipe_name,
                    source = %row.source,
                    "skipping history row with unknown source"
                ),
            }
        }
        Ok(meals)
    }

    /// Most recent parsable date in the file.
    pub fn latest_date(&self) -> Result<Option<NaiveDate>, HistoryError> {
        Ok(self.rows()?.iter().filter_map(HistoryRow::parsed_date).max())
    }

    /// Append `meals` under `date`, creating the file with a header if needed.
    pub fn append(&self, meals: &[Meal], date: NaiveDate) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let existing = match fs::read(&self.path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(self.io_error(e)),
        };

        let mut out = String::new();
        match existing.as_deref() {
            None | Some([]) => csv::write_record(&mut out, &HEADER),
            Some(bytes) if !bytes.ends_with(b"\n") => out.push_str(csv::LINE_END),
            Some(_) => {}
        }
        for meal in meals {
            HistoryRow::from_meal(meal, date).write_to(&mut out);
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        file.write_all(out.as_bytes())
            .map_err(|e| self.io_error(e))?;
        Ok(())
    }

    /// Replace the rows for `date` with `meals`, keeping every other row.
    ///
    /// The file is rewritten via a temp file and rename. A missing file is
    /// left missing.
    pub fn replace(&self, meals: &[Meal], date: NaiveDate) -> Result<(), HistoryError> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "no meal history to update");
            return Ok(());
        }

        let mut out = String::new();
        csv::write_record(&mut out, &HEADER);
        for row in self.rows()? {
            if row.parsed_date() != Some(date) {
                row.write_to(&mut out);
            }
        }
        for meal in meals {
            HistoryRow::from_meal(meal, date).write_to(&mut out);
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut file = File::create(&tmp_path).map_err(|e| self.io_error(e))?;
            file.write_all(out.as_bytes())
                .map_err(|e| self.io_error(e))?;
            file.sync_all().map_err(|e| self.io_error(e))?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
