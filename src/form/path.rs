//! Dotted field paths over JSON values.
//!
//! A path such as `Value.limits.0` addresses object members by name and array
//! elements by index. Setting a path creates missing intermediate containers:
//! an array when the next segment is an index, an object otherwise.

use serde_json::{Map, Value};

/// Read the value at `path`, if present.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate containers.
///
/// Returns a description of the problem when the path is empty, runs into a
/// scalar, or indexes past the end of an array. An index equal to the array
/// length appends.
pub fn set_path(root: &mut Value, path: &str, value: Value) -> Result<(), String> {
    if path.is_empty() {
        return Err("empty field path".to_string());
    }

    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err("field path has an empty segment".to_string());
    }

    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();
        let next_is_index = !is_last && segments[i + 1].parse::<usize>().is_ok();

        if current.is_null() {
            *current = empty_container(is_index(segment));
        }

        current = match current {
            Value::Object(map) => {
                if is_last {
                    map.insert((*segment).to_string(), value);
                    return Ok(());
                }
                map.entry((*segment).to_string())
                    .or_insert_with(|| empty_container(next_is_index))
            }
            Value::Array(items) => {
                let index: usize = segment
                    .parse()
                    .map_err(|_| format!("'{}' is not an array index", segment))?;
                if index > items.len() {
                    return Err(format!(
                        "index {} is past the end of an array of length {}",
                        index,
                        items.len()
                    ));
                }
                if index == items.len() {
                    items.push(Value::Null);
                }
                if is_last {
                    items[index] = value;
                    return Ok(());
                }
                let slot = &mut items[index];
                if slot.is_null() {
                    *slot = empty_container(next_is_index);
                }
                slot
            }
            other => {
                return Err(format!(
                    "cannot descend into {} at '{}'",
                    kind(other),
                    segment
                ))
            }
        };
    }

    Ok(())
}

fn is_index(segment: &str) -> bool {
    segment.parse::<usize>().is_ok()
}

fn empty_container(array: bool) -> Value {
    if array {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
