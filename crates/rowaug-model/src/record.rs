//! Helpers for addressing fields of a raw record.
//!
//! A raw record is an ordered sequence of string fields read from a data
//! file. These helpers cover the common chores around it: safe positional
//! access, spreadsheet-style column letters, and zipping a record with its
//! header names.

use crate::error::{AugmentError, Result};
use crate::fields::FieldMap;

/// Returns the zero-based index for a spreadsheet column name
/// (`A` = 0, ..., `Z` = 25, `AA` = 26, ...). Case-insensitive.
pub fn spreadsheet_column(name: &str) -> Result<usize> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AugmentError::Configuration(format!(
            "invalid column name '{name}'"
        )));
    }
    let mut index = 0usize;
    for c in name.chars() {
        index = index * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    Ok(index - 1)
}

/// Returns the field at `index`, trimmed, or `None` when the record is too
/// short. Surrounding whitespace is normally not significant in data files.
pub fn get_by_index(record: &[String], index: usize) -> Option<&str> {
    record.get(index).map(|field| field.trim())
}

/// Returns the field addressed by a spreadsheet column name, trimmed, or
/// `None` when the record is too short.
pub fn get_by_column<'a>(record: &'a [String], name: &str) -> Result<Option<&'a str>> {
    Ok(get_by_index(record, spreadsheet_column(name)?))
}

/// Zips a record with its header names into a [`FieldMap`].
///
/// Fails when the record and the names differ in length.
pub fn to_named(record: &[String], names: &[String]) -> Result<FieldMap> {
    if record.len() != names.len() {
        return Err(AugmentError::Configuration(format!(
            "record and names lengths do not match ({} vs {})",
            record.len(),
            names.len()
        )));
    }
    Ok(names
        .iter()
        .zip(record)
        .map(|(name, field)| (name.clone(), field.as_str().into()))
        .collect())
}
