//! Structural summaries of dataset records.

use serde_json::Value;
use std::fmt;

use crate::record::Record;

/// Name fragments that mark a field as holding point coordinates.
const POINT_FIELD_HINTS: [&str; 3] = ["input", "point", "data"];

/// How a record field is stored.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Number(f64),
    String { len: usize },
    Bool(bool),
    Null,
    /// A flat list, or an empty one.
    List { len: usize },
    /// A list whose first element is itself a list; `cols` is the length of
    /// that first row.
    NestedList { rows: usize, cols: usize },
    Object { fields: usize },
}

impl FieldKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String { len: s.chars().count() },
            Value::Bool(b) => Self::Bool(*b),
            Value::Null => Self::Null,
            Value::Array(items) => match items.first() {
                Some(Value::Array(first)) => Self::NestedList {
                    rows: items.len(),
                    cols: first.len(),
                },
                _ => Self::List { len: items.len() },
            },
            Value::Object(map) => Self::Object { fields: map.len() },
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "number, value {v}"),
            Self::String { len } => write!(f, "string, length {len}"),
            Self::Bool(b) => write!(f, "bool, value {b}"),
            Self::Null => write!(f, "null"),
            Self::List { len } => write!(f, "list, length {len}"),
            Self::NestedList { rows, cols } => write!(f, "nested list, shape {rows} x {cols}"),
            Self::Object { fields } => write!(f, "object, {fields} fields"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub name: String,
    pub kind: FieldKind,
}

impl fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)
    }
}

/// Summarizes every field of `record`, in record order.
pub fn describe_record(record: &Record) -> Vec<FieldSummary> {
    record
        .iter()
        .map(|(name, value)| FieldSummary {
            name: name.clone(),
            kind: FieldKind::of(value),
        })
        .collect()
}

/// Returns the first field whose name suggests it holds point coordinates
/// (contains "input", "point" or "data", case-insensitively).
pub fn find_points_field(record: &Record) -> Option<&str> {
    record
        .keys()
        .find(|name| {
            let lower = name.to_lowercase();
            POINT_FIELD_HINTS.iter().any(|hint| lower.contains(hint))
        })
        .map(String::as_str)
}
