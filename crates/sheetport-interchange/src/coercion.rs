//! Value coercion
//!
//! Turns an untyped value read from a file into the canonical value for a
//! column type. Coercion is total: anything it cannot make sense of becomes the
//! type's fallback instead of an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sheetport_core::{CellValue, ColumnType, today_iso_date};

/// Date-only layouts accepted by `parse_date`, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date-and-time layouts without an offset, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Coerce `raw` into the canonical value for `target`.
///
/// Null and the empty string become the type's default value. Otherwise:
/// - `Number`: the parsed number, or `0` when it does not parse
/// - `Boolean`: `true` only for `true` or the exact string `"true"`
/// - `Date`: the parsed date as `YYYY-MM-DD`, or today when it does not parse
/// - `Text`, `Link`, `Email`: the value's text, unvalidated
pub fn coerce(raw: &CellValue, target: ColumnType) -> CellValue {
    if raw.is_blank() {
        return target.default_value();
    }

    match target {
        ColumnType::Number => coerce_number(raw),
        ColumnType::Boolean => CellValue::Bool(is_true(raw)),
        ColumnType::Date => {
            let date = match raw {
                CellValue::Text(s) => parse_date(s),
                _ => None,
            };
            match date {
                Some(d) => CellValue::Text(d.format("%Y-%m-%d").to_string()),
                None => CellValue::Text(today_iso_date()),
            }
        }
        ColumnType::Text | ColumnType::Link | ColumnType::Email => {
            CellValue::Text(raw.to_display_string())
        }
    }
}

fn coerce_number(raw: &CellValue) -> CellValue {
    let n = match raw {
        CellValue::Integer(i) => return CellValue::Integer(*i),
        CellValue::Float(f) => Some(*f).filter(|f| f.is_finite()),
        CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        CellValue::Text(s) => parse_number(s),
        CellValue::Null | CellValue::Json(_) => None,
    };
    match n {
        Some(n) => CellValue::from_f64(n),
        None => CellValue::Integer(0),
    }
}

fn is_true(raw: &CellValue) -> bool {
    match raw {
        CellValue::Bool(b) => *b,
        CellValue::Text(s) => s == "true",
        _ => false,
    }
}

/// Parse a finite number, ignoring surrounding whitespace.
///
/// `inf` and `NaN` spellings are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a calendar date from common textual layouts.
///
/// Accepts RFC 3339 and RFC 2822 timestamps (converted to their UTC date),
/// ISO dates and date-times, slash-separated dates, spelled-out month names and
/// a bare four-digit year (January 1st of that year).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }

    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(d);
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    None
}
