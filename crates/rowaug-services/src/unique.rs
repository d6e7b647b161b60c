//! Cross-record uniqueness checking with duplicate counting.

use std::collections::{BTreeMap, HashMap};

/// Tracks which values have been seen, per category.
///
/// Categories are fully independent namespaces: the same value is "new"
/// once per category. State grows monotonically for the lifetime of the
/// checker and never shrinks.
#[derive(Debug, Default)]
pub struct UniquenessChecker {
    seen: HashMap<String, HashMap<String, u64>>,
}

impl UniquenessChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True the first time this value is seen under this category, false on
    /// every repeat. The occurrence count is incremented either way.
    ///
    /// Comparison is case-insensitive unless `strict` is set.
    pub fn is_new(&mut self, value: &str, category: &str, strict: bool) -> bool {
        let normalized = if strict {
            value.to_string()
        } else {
            value.to_lowercase()
        };
        let count = self
            .seen
            .entry(category.to_string())
            .or_default()
            .entry(normalized)
            .or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Per category, the values that were seen more than once, with their
    /// occurrence counts.
    pub fn duplicates(&self) -> BTreeMap<String, BTreeMap<String, u64>> {
        self.seen
            .iter()
            .map(|(category, values)| {
                let dupes: BTreeMap<String, u64> = values
                    .iter()
                    .filter(|&(_, &count)| count > 1)
                    .map(|(value, &count)| (value.clone(), count))
                    .collect();
                (category.clone(), dupes)
            })
            .collect()
    }
}
