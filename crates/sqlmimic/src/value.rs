//! Scalar values for bound arguments and result cells.
//!
//! Argument matching and fixture rows share one representation. Equality is
//! strictly typed: distinct variants never compare equal, so `Int(1)` does
//! not match `Float(1.0)`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single SQL scalar: a bound statement argument or a result-set cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

/// One result row: column name to cell value. Row order in a payload is
/// significant, column order is not.
pub type Row = HashMap<String, Value>;

impl Value {
    /// Whether this is the SQL NULL value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Bytes(bytes) => {
                write!(f, "x'")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, "'")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(x) = n.as_f64() {
                    Value::Float(x)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            // Nested arrays/objects have no scalar shape; keep their JSON text.
            other => Value::Text(other.to_string()),
        }
    }
}

/// Convert a `serde_json::json!` array of objects into fixture rows.
///
/// Non-object array entries are skipped; a non-array input yields no rows.
///
/// ```
/// let rows = sqlmimic::rows_from_json(serde_json::json!([
///     {"id": 1, "name": "ada"},
///     {"id": 2, "name": "grace"},
/// ]));
/// assert_eq!(rows.len(), 2);
/// ```
pub fn rows_from_json(value: serde_json::Value) -> Vec<Row> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Object(fields) => Some(
                    fields
                        .into_iter()
                        .map(|(name, cell)| (name, Value::from(cell)))
                        .collect(),
                ),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Build a `Vec<Value>` from mixed-type literals.
///
/// ```
/// let args = sqlmimic::values!["ada", 1, true];
/// assert_eq!(args[1], sqlmimic::Value::Int(1));
/// ```
#[macro_export]
macro_rules! values {
    ($($v:expr),* $(,)?) => {
        vec![$($crate::Value::from($v)),*]
    };
}
