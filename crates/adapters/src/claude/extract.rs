// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured payload extraction from the Claude CLI JSON envelope
//!
//! The envelope printed by `claude --output-format json` has moved the
//! structured payload between CLI versions. Extraction walks an ordered
//! list of strategies; each either yields the payload or declines.

use super::ClaudeError;
use mp_core::Truncate;
use serde_json::{Map, Value};

/// Bytes of the pretty-printed envelope kept in the missing-payload error.
pub const ENVELOPE_DIAGNOSTIC_LEN: usize = 2000;

type Envelope = Map<String, Value>;

/// One way of finding the payload in an envelope.
type Strategy = fn(&Envelope) -> Option<Value>;

/// Strategies in priority order, named by the key they inspect.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("structured_output", structured_output),
    ("result", inline_result),
];

/// `structured_output` as emitted for `--json-schema` runs.
fn structured_output(envelope: &Envelope) -> Option<Value> {
    envelope
        .get("structured_output")
        .filter(|v| !v.is_null())
        .cloned()
}

/// `result` holding the payload inline, either as an object or as a
/// JSON-encoded string (CLI 2.1 and later).
fn inline_result(envelope: &Envelope) -> Option<Value> {
    match envelope.get("result")? {
        Value::Object(obj) => Some(Value::Object(obj.clone())),
        Value::String(s) if !s.trim().is_empty() => match serde_json::from_str(s) {
            Ok(Value::Object(obj)) => Some(Value::Object(obj)),
            Ok(_) | Err(_) => None,
        },
        _ => None,
    }
}

/// Parse CLI stdout and return the structured payload.
///
/// Invalid JSON is fatal with no fallback. If no strategy yields a payload
/// the error lists the keys that were present.
pub fn extract_payload(stdout: &str) -> Result<Value, ClaudeError> {
    let parsed: Value = serde_json::from_str(stdout).map_err(ClaudeError::MalformedOutput)?;
    let envelope = match parsed {
        Value::Object(envelope) => envelope,
        other => return Err(ClaudeError::NotAnObject(json_kind(&other))),
    };

    for (key, strategy) in STRATEGIES {
        if let Some(payload) = strategy(&envelope) {
            tracing::debug!(key, "found structured payload");
            return Ok(payload);
        }
    }

    let pretty = serde_json::to_string_pretty(&envelope).unwrap_or_default();
    Err(ClaudeError::MissingPayload {
        keys: envelope.keys().cloned().collect(),
        envelope: pretty.head(ENVELOPE_DIAGNOSTIC_LEN).to_string(),
    })
}

/// Meal records under the payload's `meals` key.
///
/// A payload without a `meals` array yields no records; the validator
/// reports the resulting count mismatch.
pub fn meal_records(payload: &Value) -> Vec<Value> {
    payload
        .get("meals")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
