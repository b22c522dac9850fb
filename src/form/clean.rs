//! Normalization used for dirty checks.
//!
//! Two records are considered equal when they are equal after cleaning.
//! Cleaning drops:
//! - `null`
//! - empty strings (not trimmed: `" "` is kept)
//! - arrays and objects that are empty once their contents are cleaned
//!
//! Numbers and booleans are always kept, so `0` and `false` still count as
//! values. Array elements that clean away are removed, shifting later
//! elements down.

use serde_json::{Map, Value};

/// Clean a JSON value, returning `None` when nothing meaningful remains.
pub fn clean(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.iter().filter_map(clean).collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Array(cleaned))
            }
        }
        Value::Object(map) => {
            let cleaned: Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| clean(v).map(|v| (k.clone(), v)))
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                Some(Value::Object(cleaned))
            }
        }
        other => Some(other.clone()),
    }
}

/// Check whether two values are equal after cleaning.
pub fn same_after_clean(a: &Value, b: &Value) -> bool {
    clean(a) == clean(b)
}
