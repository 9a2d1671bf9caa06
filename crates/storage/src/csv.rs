// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RFC 4180 style CSV reading and writing.
//!
//! Only what the history file needs: every field is text, quoted fields
//! may contain separators and line breaks, blank lines are skipped.

/// Record terminator used when writing.
pub(crate) const LINE_END: &str = "\r\n";

/// Split `text` into records of fields.
///
/// Lenient on malformed input: an unterminated quote runs to the end of
/// the text and stray quotes inside unquoted fields are kept literally.
pub(crate) fn parse(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_started = false;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut field));
                field_started = false;
                finish_record(&mut records, &mut record);
            }
            _ => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if field_started || !record.is_empty() {
        record.push(field);
        finish_record(&mut records, &mut record);
    }
    records
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>) {
    let record = std::mem::take(record);
    let blank = record.len() == 1 && record[0].is_empty();
    if !blank {
        records.push(record);
    }
}

/// Append one record, quoting fields where needed, terminated by [`LINE_END`].
pub(crate) fn write_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if needs_quoting(field) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str(LINE_END);
}

fn needs_quoting(field: &str) -> bool {
    field.contains([',', '"', '\r', '\n'])
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
