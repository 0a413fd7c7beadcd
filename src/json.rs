//! JSON interop.
//!
//! Converts between [`serde_json::Value`] and the crate [`Value`] model, and cleans JSON text:
//!
//! - A single JSON document: [`clean_json_str`]
//! - Newline-delimited JSON (NDJSON): [`clean_ndjson_str`]
//!
//! Conversion back to JSON follows the usual `JSON.stringify` conventions: undefined values,
//! functions and symbols are dropped from objects, become `null` inside arrays and produce no
//! document at the top level.

use chrono::SecondsFormat;
use serde::{Serialize, Serializer};

use crate::error::{CleanError, CleanResult};
use crate::processing::{clean_value, Engine};
use crate::types::{Mapping, Value};

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n),
            serde_json::Value::String(s) => Value::Utf8(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                let mut out = Mapping::with_capacity(obj.len());
                for (k, v) in obj {
                    out.push_unique(k, Value::from(v));
                }
                Value::Object(out)
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        Value::from(v.clone())
    }
}

fn number_to_value(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int64(i)
    } else if let Some(u) = n.as_u64() {
        // Only reachable above i64::MAX.
        Value::BigInt(i128::from(u))
    } else {
        Value::Float64(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Convert a [`Value`] into JSON, or `None` if the value has no JSON representation.
pub fn to_json(value: &Value) -> Option<serde_json::Value> {
    use serde_json::Value as J;

    match value {
        Value::Undefined | Value::Function(_) | Value::Symbol(_) => None,
        Value::Null => Some(J::Null),
        Value::Bool(b) => Some(J::Bool(*b)),
        Value::Int64(i) => Some(J::from(*i)),
        Value::Float64(f) => Some(
            serde_json::Number::from_f64(*f)
                .map(J::Number)
                .unwrap_or(J::Null),
        ),
        Value::BigInt(n) => Some(bigint_to_json(*n)),
        Value::Utf8(s) => Some(J::String(s.clone())),
        Value::Date(d) => Some(J::String(d.to_rfc3339_opts(SecondsFormat::Millis, true))),
        Value::Array(items) | Value::Set(items) => Some(J::Array(
            items.iter().map(|i| to_json(i).unwrap_or(J::Null)).collect(),
        )),
        Value::Object(fields) => Some(mapping_to_json(fields)),
        Value::Instance(inst) => Some(mapping_to_json(&inst.fields)),
        Value::Regex(p) => Some(J::String(p.to_string())),
        Value::Map(pairs) => Some(J::Array(
            pairs
                .iter()
                .map(|(k, v)| {
                    J::Array(vec![
                        to_json(k).unwrap_or(J::Null),
                        to_json(v).unwrap_or(J::Null),
                    ])
                })
                .collect(),
        )),
        Value::Error(message) => Some(J::String(message.clone())),
    }
}

fn mapping_to_json(fields: &Mapping) -> serde_json::Value {
    let mut obj = serde_json::Map::with_capacity(fields.len());
    for (k, v) in fields.iter() {
        if let Some(j) = to_json(v) {
            obj.insert(k.to_string(), j);
        }
    }
    serde_json::Value::Object(obj)
}

fn bigint_to_json(n: i128) -> serde_json::Value {
    if let Ok(i) = i64::try_from(n) {
        serde_json::Value::from(i)
    } else if let Ok(u) = u64::try_from(n) {
        serde_json::Value::from(u)
    } else {
        serde_json::Value::String(n.to_string())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self)
            .unwrap_or(serde_json::Value::Null)
            .serialize(serializer)
    }
}

/// Clean a JSON value with the default policy.
pub fn clean_json(value: &serde_json::Value) -> Option<serde_json::Value> {
    clean_value(&Value::from(value)).and_then(|v| to_json(&v))
}

/// Parse a single JSON document from `input` and clean it with `engine`.
///
/// Returns `Ok(None)` when the whole document cleans away.
pub fn clean_json_str(input: &str, engine: &Engine) -> CleanResult<Option<serde_json::Value>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CleanError::InvalidInput {
            message: "json input is empty".to_string(),
        });
    }

    let parsed = serde_json::from_str::<serde_json::Value>(trimmed)?;
    let cleaned = engine.process(&Value::from(parsed))?;
    Ok(cleaned.and_then(|v| to_json(&v)))
}

/// Clean newline-delimited JSON with `engine`, one record per non-blank line.
///
/// Records that clean away entirely are dropped; the rest keep their order.
pub fn clean_ndjson_str(input: &str, engine: &Engine) -> CleanResult<Vec<serde_json::Value>> {
    let mut out = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str::<serde_json::Value>(line).map_err(|e| {
            CleanError::InvalidInput {
                message: format!("invalid ndjson at line {}: {}", i + 1, e),
            }
        })?;
        if let Some(cleaned) = engine.process(&Value::from(record))? {
            if let Some(j) = to_json(&cleaned) {
                out.push(j);
            }
        }
    }
    Ok(out)
}
