use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::RawColumn;

/// Resolve a raw column to a JSON value, substituting `fallback` when there is nothing usable.
///
/// Structured values pass through untouched. Text is parsed as JSON; parse failures are
/// logged and, like a parsed `null`, yield the fallback. Absent and scalar columns yield the
/// fallback.
pub fn normalize_json_column(raw: &RawColumn, fallback: Value) -> Value {
    match raw {
        RawColumn::Structured(value) => value.clone(),
        RawColumn::Encoded(text) if text.is_empty() => fallback,
        RawColumn::Encoded(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Null) => fallback,
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(%error, "failed to parse JSON column; using fallback");
                fallback
            }
        },
        RawColumn::Absent | RawColumn::Scalar(_) => fallback,
    }
}

/// Survey questions as an ordered list, whatever shape they were stored in.
pub fn normalize_questions(raw: &RawColumn) -> Vec<Value> {
    match normalize_json_column(raw, Value::Array(Vec::new())) {
        Value::Array(items) => items,
        Value::Object(entries) => ordered_values(entries),
        _ => Vec::new(),
    }
}

/// Demographic filters as a key/value mapping; list-shaped payloads are discarded.
pub fn normalize_filters(raw: &RawColumn) -> Map<String, Value> {
    match normalize_json_column(raw, Value::Object(Map::new())) {
        Value::Object(entries) => entries,
        Value::Array(_) => {
            debug!("discarding list-encoded demographic filters");
            Map::new()
        }
        _ => Map::new(),
    }
}

/// Index-like keys come first in numeric order; named keys follow in authored order.
fn ordered_values(entries: Map<String, Value>) -> Vec<Value> {
    let mut indexed = Vec::new();
    let mut named = Vec::new();

    for (key, value) in entries {
        match array_index(&key) {
            Some(index) => indexed.push((index, value)),
            None => named.push(value),
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed
        .into_iter()
        .map(|(_, value)| value)
        .chain(named)
        .collect()
}

fn array_index(key: &str) -> Option<u32> {
    let index = key.parse::<u32>().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}
