//! Cell values
//!
//! A `CellValue` is what sits in one cell of a table. The same type carries raw
//! values read from import files and the canonical values produced by coercion,
//! so it serializes untagged: a stored or exported document shows plain JSON
//! scalars.

use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// Variant order matters for untagged deserialization: integers are tried before
/// floats so that `30` stays `30` rather than becoming `30.0`, and anything that is
/// not a scalar (arrays, objects) lands in `Json` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value
    Null,

    /// Boolean value
    Bool(bool),

    /// Integer value (fits in i64)
    Integer(i64),

    /// Floating-point value
    Float(f64),

    /// String value
    Text(String),

    /// Any other JSON shape, kept as-is
    Json(serde_json::Value),
}

impl CellValue {
    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// True for null and for the empty string, the two shapes import treats as "no value".
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Try to get as a string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Build the numeric value for `n`, preferring `Integer` when `n` has no fraction.
    pub fn from_f64(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
            CellValue::Integer(n as i64)
        } else {
            CellValue::Float(n)
        }
    }

    /// Text shown for this value in a cell or a CSV field.
    ///
    /// Null renders as the empty string; non-scalar JSON renders compactly.
    pub fn to_display_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Json(v) => v.to_string(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Integer(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}
