//! JSON <-> Anise Value conversion utilities

use std::collections::HashMap;

use super::CliError;
use crate::Value;

/// Convert serde_json::Value to an Anise Value.
///
/// There is no null value, so `null` converts to `None`; nulls inside arrays
/// and objects are dropped.
pub fn json_to_value(v: serde_json::Value) -> Option<Value> {
    match v {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Boolean(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => n.as_f64().map(Value::Float),
        },
        serde_json::Value::String(s) => Some(Value::String(s)),
        serde_json::Value::Array(arr) => {
            Some(Value::Array(arr.into_iter().filter_map(json_to_value).collect()))
        }
        serde_json::Value::Object(obj) => Some(Value::Object(
            obj.into_iter()
                .filter_map(|(k, v)| json_to_value(v).map(|v| (k, v)))
                .collect(),
        )),
    }
}

/// Convert an Anise Value to serde_json::Value
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        // Timestamps and functions have no JSON form; use their display text
        v @ (Value::Timestamp(_) | Value::Function(_)) => serde_json::Value::String(v.to_string()),
        Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(value_to_json).collect())
        }
        Value::Object(obj) => serde_json::Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Variables from a JSON object, one per top-level key.
pub fn variables_from_json(json: serde_json::Value) -> Result<HashMap<String, Value>, CliError> {
    let kind = json_kind(&json);
    match json_to_value(json) {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(CliError::ContextNotObject(kind)),
    }
}

/// Parse a `name=value` binding. The value is read as JSON when it parses,
/// otherwise it is taken as a plain string.
pub fn parse_var(binding: &str) -> Result<(String, Value), CliError> {
    let Some((name, raw)) = binding.split_once('=') else {
        return Err(CliError::InvalidVar(binding.to_string()));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidVar(binding.to_string()));
    }

    let value = serde_json::from_str(raw)
        .ok()
        .and_then(json_to_value)
        .unwrap_or_else(|| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
