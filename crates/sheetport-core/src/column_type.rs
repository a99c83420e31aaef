//! Column type registry
//!
//! The fixed catalog of column types a table may declare. Each type knows its
//! default cell value; coercion rules live in `sheetport-interchange`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::types::CellValue;

/// Returned when a type name outside the catalog is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown column type: '{0}'")]
pub struct UnknownColumnType(pub String);

/// Semantic type of a column.
///
/// The type is a hint for display and coercion. `Link` and `Email` hold plain
/// text and are never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Text,
    Boolean,
    Date,
    Link,
    Email,
}

impl ColumnType {
    /// Every supported type, in catalog order.
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Number,
        ColumnType::Text,
        ColumnType::Boolean,
        ColumnType::Date,
        ColumnType::Link,
        ColumnType::Email,
    ];

    /// Name used in stored documents and JSON files
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Link => "link",
            ColumnType::Email => "email",
        }
    }

    /// Returns a label for display
    pub fn display_name(&self) -> &'static str {
        match self {
            ColumnType::Number => "Number",
            ColumnType::Text => "Text",
            ColumnType::Boolean => "Yes/No",
            ColumnType::Date => "Date",
            ColumnType::Link => "Link",
            ColumnType::Email => "Email",
        }
    }

    /// Value used when a cell of this type is absent.
    ///
    /// `Date` defaults to today's date, so two calls on different days differ.
    pub fn default_value(&self) -> CellValue {
        match self {
            ColumnType::Number => CellValue::Integer(0),
            ColumnType::Boolean => CellValue::Bool(false),
            ColumnType::Date => CellValue::Text(today_iso_date()),
            ColumnType::Text | ColumnType::Link | ColumnType::Email => {
                CellValue::Text(String::new())
            }
        }
    }

    /// Check whether `name` is in the catalog
    pub fn is_known(name: &str) -> bool {
        name.parse::<ColumnType>().is_ok()
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Text
    }
}

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownColumnType(s.to_string()))
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Today's UTC date as `YYYY-MM-DD`.
pub fn today_iso_date() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
