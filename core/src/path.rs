//! Resolving dotted paths against a card record.

use serde_json::{Map, Value};

use crate::sanitize::strip_markup;

/// Walks `path` segment by segment. Object keys are looked up by name, a
/// numeric segment indexes into an array.
pub fn resolve<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.').filter(|segment| !segment.is_empty());
    let mut current: &Value = fields.get(segments.next()?)?;

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Resolves `path` and filters out values that carry nothing to show.
pub fn resolve_present<'a>(fields: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    resolve(fields, path).filter(|value| !is_blank(value))
}

/// Null, whitespace (or markup-only) strings and empty containers are blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => strip_markup(s).trim().is_empty(),
        Value::Array(items) => items.iter().all(is_blank),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Human readable text for a scalar-ish value.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !is_blank(item))
            .map(stringify)
            .collect::<Vec<String>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}
