//! Column type inference
//!
//! Guesses the type of an imported column from a handful of its values. The
//! guess is a heuristic; coercion downstream tolerates a wrong one.

use std::borrow::Borrow;

use sheetport_core::{CellValue, ColumnType};

use crate::coercion::{parse_date, parse_number};

/// Number of non-empty values examined per column
pub const SAMPLE_SIZE: usize = 10;

/// Infer a column type from its values.
///
/// Only the first [`SAMPLE_SIZE`] values that are neither null nor empty are
/// examined; with none at all the column is `Text`. The first rule every sample
/// satisfies wins, in this order: number, boolean, date, link (`http`/`www`
/// prefix), email (contains `@`), text.
pub fn infer_column_type<I>(values: I) -> ColumnType
where
    I: IntoIterator,
    I::Item: Borrow<CellValue>,
{
    let samples: Vec<I::Item> = values
        .into_iter()
        .filter(|v| !v.borrow().is_blank())
        .take(SAMPLE_SIZE)
        .collect();

    if samples.is_empty() {
        return ColumnType::Text;
    }

    let all = |pred: fn(&CellValue) -> bool| samples.iter().all(|v| pred(v.borrow()));

    if all(is_number) {
        ColumnType::Number
    } else if all(is_boolean) {
        ColumnType::Boolean
    } else if all(is_date) {
        ColumnType::Date
    } else if all(is_link) {
        ColumnType::Link
    } else if all(is_email) {
        ColumnType::Email
    } else {
        ColumnType::Text
    }
}

fn is_number(value: &CellValue) -> bool {
    match value {
        CellValue::Integer(_) => true,
        CellValue::Float(f) => f.is_finite(),
        CellValue::Text(s) => parse_number(s).is_some(),
        _ => false,
    }
}

fn is_boolean(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(_) => true,
        CellValue::Text(s) => s == "true" || s == "false",
        _ => false,
    }
}

fn is_date(value: &CellValue) -> bool {
    value.as_str().is_some_and(|s| parse_date(s).is_some())
}

fn is_link(value: &CellValue) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.starts_with("http") || s.starts_with("www"))
}

fn is_email(value: &CellValue) -> bool {
    value.as_str().is_some_and(|s| s.contains('@'))
}
