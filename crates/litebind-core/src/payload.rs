//! Keyed payloads exchanged with the remote endpoint.
//!
//! Both directions use the same shape: a JSON object mapping a key to a
//! scalar. Key order carries no meaning but is preserved so request bodies
//! are deterministic.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Mapping from key to scalar value.
pub type KeyedPayload = IndexMap<String, Scalar>;

/// A single payload value.
///
/// Nested arrays and objects are not scalars; they are carried as their JSON
/// text so they can still be rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[serde(from = "Value")]
pub enum Scalar {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number
    Number(serde_json::Number),
    /// JSON string, or the serialized form of a nested value
    Text(String),
}

impl Scalar {
    /// Textual form used when writing into a widget.
    ///
    /// `null` renders as the empty string.
    pub fn text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// True if the value compares loosely equal to the number zero.
    ///
    /// Numbers are compared directly. Strings count when their trimmed form
    /// is empty or parses to zero (`" "`, `"0"`, `"0.0"`, `" 0 "`).
    pub fn is_numeric_zero(&self) -> bool {
        match self {
            Self::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
            Self::Text(s) => {
                let trimmed = s.trim();
                trimmed.is_empty() || trimmed.parse::<f64>().is_ok_and(|f| f == 0.0)
            },
            Self::Null | Self::Bool(_) => false,
        }
    }

    /// Whether the textual form is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

impl From<Value> for Scalar {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            nested @ (Value::Array(_) | Value::Object(_)) => Self::Text(nested.to_string()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Interpret a raw fetch response as a keyed payload.
///
/// Only JSON objects are payloads. `null` and every other shape yield `None`,
/// which the binder treats as "nothing to apply".
pub fn parse_payload(response: &Value) -> Option<KeyedPayload> {
    let Value::Object(map) = response else {
        return None;
    };

    Some(map.iter().map(|(key, value)| (key.clone(), Scalar::from(value.clone()))).collect())
}
