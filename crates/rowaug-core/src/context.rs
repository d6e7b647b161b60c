//! The shared mutable state rules operate on.

use std::collections::HashMap;

use rowaug_model::{AugmentError, FieldMap, Result, Value};
use rowaug_services::{ColumnNameIndexMapper, QuotaCell, TokenIssuer, UniquenessChecker};

/// Shared state for one pipeline: registered services, ad hoc named values,
/// and the in-progress augmented result.
///
/// The known services live in typed slots; everything else a rule wants to
/// stash between records goes into the string-keyed extension map. The
/// context lives as long as its pipeline, so services and extensions keep
/// their state across records; only the augmented slot is reset per record.
#[derive(Debug, Default)]
pub struct AugmentationContext {
    tokens: Option<TokenIssuer>,
    quota: Option<QuotaCell>,
    unique: Option<UniquenessChecker>,
    mapper: Option<ColumnNameIndexMapper>,
    extensions: HashMap<String, Value>,
    augmented: FieldMap,
}

impl AugmentationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token issuer.
    #[must_use]
    pub fn with_tokens(mut self, tokens: TokenIssuer) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Registers a quota cell.
    #[must_use]
    pub fn with_quota(mut self, quota: QuotaCell) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Registers a uniqueness checker.
    #[must_use]
    pub fn with_unique(mut self, unique: UniquenessChecker) -> Self {
        self.unique = Some(unique);
        self
    }

    /// Registers a column-name mapper.
    #[must_use]
    pub fn with_mapper(mut self, mapper: ColumnNameIndexMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// The registered token issuer, or a configuration error when none is.
    pub fn tokens_mut(&mut self) -> Result<&mut TokenIssuer> {
        self.tokens
            .as_mut()
            .ok_or_else(|| AugmentError::Configuration("no token issuer registered".to_string()))
    }

    /// The registered quota cell, or a configuration error when none is.
    pub fn quota_mut(&mut self) -> Result<&mut QuotaCell> {
        self.quota
            .as_mut()
            .ok_or_else(|| AugmentError::Configuration("no quota cell registered".to_string()))
    }

    pub fn quota(&self) -> Option<&QuotaCell> {
        self.quota.as_ref()
    }

    /// The registered uniqueness checker, or a configuration error when
    /// none is.
    pub fn unique_mut(&mut self) -> Result<&mut UniquenessChecker> {
        self.unique.as_mut().ok_or_else(|| {
            AugmentError::Configuration("no uniqueness checker registered".to_string())
        })
    }

    pub fn unique(&self) -> Option<&UniquenessChecker> {
        self.unique.as_ref()
    }

    /// The registered column mapper, or a configuration error when none is.
    pub fn mapper(&self) -> Result<&ColumnNameIndexMapper> {
        self.mapper
            .as_ref()
            .ok_or_else(|| AugmentError::Configuration("no column mapper registered".to_string()))
    }

    /// Reads an ad hoc named value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Stores an ad hoc named value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extensions.insert(key.into(), value.into());
    }

    /// Appends to a stored value, accumulating a list under `key`.
    ///
    /// An unset key is set to a one-element list holding `value`, even when
    /// `value` is itself a list. For a set key, a non-list stored value is
    /// coerced to a one-element list first; an appended list appends its
    /// elements; a map appended onto a stored map merges key-wise with
    /// later keys overwriting; anything else is pushed as a single element.
    pub fn append_to(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let slot = self.extensions.remove(&key);
        let merged = match (slot, value) {
            (None, other) => Value::List(vec![other]),
            (Some(Value::Map(mut existing)), Value::Map(incoming)) => {
                existing.extend(incoming);
                Value::Map(existing)
            }
            (Some(existing), incoming) => {
                let mut items = match existing {
                    Value::List(items) => items,
                    scalar => vec![scalar],
                };
                match incoming {
                    Value::List(new_items) => items.extend(new_items),
                    other => items.push(other),
                }
                Value::List(items)
            }
        };
        self.extensions.insert(key, merged);
    }

    /// The fields accumulated by the rules that have run so far in the
    /// current `augment()` call. Empty outside a call.
    pub fn augmented_so_far(&self) -> &FieldMap {
        &self.augmented
    }

    /// Overwrites one field of the in-progress augmented result.
    ///
    /// Meant for corrective rules that need to adjust an earlier rule's
    /// output without re-emitting it.
    pub fn overwrite_augmented(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.augmented.insert(name, value);
    }

    pub(crate) fn reset_augmented(&mut self) {
        self.augmented.clear();
    }

    pub(crate) fn merge_augmented(&mut self, fields: FieldMap) {
        self.augmented.merge(fields);
    }
}
