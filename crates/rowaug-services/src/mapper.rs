//! Column-name to index lookup.

use std::collections::HashMap;

use rowaug_model::{AugmentError, Result};

/// Maps trimmed column names to their zero-based position in a header.
#[derive(Debug, Clone)]
pub struct ColumnNameIndexMapper {
    lookup: HashMap<String, usize>,
}

impl ColumnNameIndexMapper {
    /// Builds a mapper from an ordered sequence of column names.
    ///
    /// Names are trimmed before use; duplicates or names that are blank
    /// after trimming are rejected.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lookup = HashMap::new();
        for (index, name) in names.into_iter().enumerate() {
            let name = name.as_ref().trim().to_string();
            if name.is_empty() {
                return Err(AugmentError::Configuration(format!(
                    "column name at position {index} is blank"
                )));
            }
            if lookup.insert(name.clone(), index).is_some() {
                return Err(AugmentError::Configuration(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }
        Ok(Self { lookup })
    }

    /// The zero-based position of `name`, or -1 when it is unknown.
    pub fn column_number(&self, name: &str) -> i64 {
        self.lookup
            .get(name.trim())
            .map_or(-1, |&index| index as i64)
    }

    /// The zero-based position of `name`; unknown names are an error.
    pub fn require_column_number(&self, name: &str) -> Result<usize> {
        self.lookup
            .get(name.trim())
            .copied()
            .ok_or_else(|| AugmentError::NameNotFound(name.trim().to_string()))
    }

    /// The full name-to-index lookup table.
    pub fn mapping(&self) -> &HashMap<String, usize> {
        &self.lookup
    }
}
