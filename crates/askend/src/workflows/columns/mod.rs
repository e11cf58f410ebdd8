//! Canonicalisation of JSON columns that the backend may hand back either as native JSON or
//! as JSON-encoded text.

mod normalizer;

pub use normalizer::{normalize_filters, normalize_json_column, normalize_questions};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON column exactly as it arrived from the data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum RawColumn {
    #[default]
    Absent,
    /// JSON text that still has to be parsed.
    Encoded(String),
    /// An array or object.
    Structured(Value),
    /// A bare number or boolean.
    Scalar(Value),
}

impl From<Value> for RawColumn {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawColumn::Absent,
            Value::String(text) => RawColumn::Encoded(text),
            Value::Array(_) | Value::Object(_) => RawColumn::Structured(value),
            Value::Bool(_) | Value::Number(_) => RawColumn::Scalar(value),
        }
    }
}

impl From<RawColumn> for Value {
    fn from(column: RawColumn) -> Self {
        match column {
            RawColumn::Absent => Value::Null,
            RawColumn::Encoded(text) => Value::String(text),
            RawColumn::Structured(value) | RawColumn::Scalar(value) => value,
        }
    }
}

impl From<&str> for RawColumn {
    fn from(text: &str) -> Self {
        RawColumn::Encoded(text.to_string())
    }
}
