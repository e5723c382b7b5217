//! Row types for every table, plus their conversion into core entities.
//!
//! Enum-valued columns are stored as text and parsed on the way out, so a
//! row that fails to decode surfaces as a [`RowDecodeError`].

pub mod bid;
pub mod employee;
pub mod organization;
pub mod tender;

use std::str::FromStr;

/// A stored value could not be mapped onto its domain type.
#[derive(Debug, thiserror::Error)]
#[error("invalid value '{value}' in {table}.{column}")]
pub struct RowDecodeError {
    pub table: &'static str,
    pub column: &'static str,
    pub value: String,
}

pub(crate) fn parse_column<T: FromStr>(
    table: &'static str,
    column: &'static str,
    value: &str,
) -> Result<T, RowDecodeError> {
    value.parse().map_err(|_| RowDecodeError {
        table,
        column,
        value: value.to_string(),
    })
}
