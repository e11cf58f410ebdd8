//! Field decoders for demographic filter values.
//!
//! The `read_*` functions work on a single raw value and back both the typed
//! `SurveyFilterSpec` and the per-axis reads made while screening a raw mapping.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::domain::FilterValue;

/// Falsy values mean the creator left the constraint unset.
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => false,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

pub(super) fn read_text(value: &Value) -> Result<Option<String>, String> {
    if is_unset(value) {
        return Ok(None);
    }

    match value {
        Value::String(text) => Ok(Some(text.clone())),
        other => Err(format!("expected text, found {}", kind(other))),
    }
}

pub(super) fn read_choice(value: &Value) -> Result<Option<FilterValue>, String> {
    if is_unset(value) {
        return Ok(None);
    }

    match value {
        Value::String(text) => Ok(Some(FilterValue::Scalar(text.clone()))),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => Ok(text.clone()),
                other => Err(format!(
                    "expected a list of text, found a {} entry",
                    kind(other)
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|options| Some(FilterValue::List(options))),
        other => Err(format!(
            "expected text or a list of text, found {}",
            kind(other)
        )),
    }
}

/// Age and income bounds. Anything that is not a finite number, or numeric text, places no
/// constraint on the axis.
pub(super) fn read_bound(value: &Value) -> Option<f64> {
    if is_unset(value) {
        return None;
    }

    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}

pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    read_text(&Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

pub(super) fn choice<'de, D>(deserializer: D) -> Result<Option<FilterValue>, D::Error>
where
    D: Deserializer<'de>,
{
    read_choice(&Value::deserialize(deserializer)?).map_err(D::Error::custom)
}

pub(super) fn bound<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(read_bound(&Value::deserialize(deserializer)?))
}
