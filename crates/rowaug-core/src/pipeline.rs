//! The augmentation pipeline.

use std::collections::HashSet;

use tracing::{debug, trace};

use rowaug_model::{AugmentError, FieldMap, Result};

use crate::context::AugmentationContext;

/// An augmentation step: reads the context and the raw record, returns the
/// fields it contributes.
pub type RuleFn = Box<dyn FnMut(&mut AugmentationContext, &[String]) -> Result<FieldMap>>;

/// Augments records according to named rules, applied in the order they
/// were registered.
///
/// Rules operate record by record: a rule sees only the current raw record
/// plus whatever earlier rules put into the context. Each rule's returned
/// fields are merged into the running result with right bias, so a later
/// rule wins on a field-name collision.
#[derive(Default)]
pub struct Augmentor {
    context: AugmentationContext,
    rules: Vec<(String, RuleFn)>,
    required_columns: Option<Vec<String>>,
    output_order: Option<Vec<String>>,
}

impl Augmentor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline around a prepared context (with services already
    /// registered).
    pub fn with_context(context: AugmentationContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    pub fn context(&self) -> &AugmentationContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AugmentationContext {
        &mut self.context
    }

    /// Registers a rule at the end of the current ordering.
    ///
    /// Rule names are unique within a pipeline; registering a second rule
    /// under an existing name fails and leaves the first one intact.
    pub fn add_rule<F>(&mut self, name: impl Into<String>, rule: F) -> Result<()>
    where
        F: FnMut(&mut AugmentationContext, &[String]) -> Result<FieldMap> + 'static,
    {
        let name = name.into();
        if self.rules.iter().any(|(existing, _)| *existing == name) {
            return Err(AugmentError::DuplicateRule(name));
        }
        self.rules.push((name, Box::new(rule)));
        Ok(())
    }

    /// Removes the named rule; absent names are a no-op.
    pub fn remove_rule(&mut self, name: &str) {
        self.rules.retain(|(existing, _)| existing != name);
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Rule names in execution order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    /// Declares the exact set of fields the augmented result must contain:
    /// a missing one and an undeclared extra one are both failures.
    pub fn set_required_columns<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = Some(names.into_iter().map(Into::into).collect());
    }

    /// Declares the order in which the result's fields are emitted. The
    /// names double as an exact-set contract, checked independently of
    /// [`set_required_columns`].
    ///
    /// [`set_required_columns`]: Augmentor::set_required_columns
    pub fn set_column_output_order<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_order = Some(names.into_iter().map(Into::into).collect());
    }

    /// Runs all rules over one record and returns the validated (and, when
    /// an output order is set, reordered) augmented result.
    ///
    /// Any failure aborts the record entirely; no partial result is kept
    /// beyond what [`AugmentationContext::augmented_so_far`] shows.
    pub fn augment(&mut self, record: &[String]) -> Result<FieldMap> {
        self.context.reset_augmented();
        for (name, rule) in &mut self.rules {
            let fields = rule(&mut self.context, record)?;
            trace!(rule = %name, fields = fields.len(), "rule produced fields");
            self.context.merge_augmented(fields);
        }

        let augmented = self.context.augmented_so_far();
        if let Some(required) = &self.required_columns {
            check_exact_set(augmented, required)?;
        }
        if let Some(order) = &self.output_order {
            if let Some(required) = &self.required_columns {
                let declared: HashSet<&str> = required.iter().map(String::as_str).collect();
                let ordered: HashSet<&str> = order.iter().map(String::as_str).collect();
                if declared != ordered {
                    return Err(AugmentError::SpecificationConflict);
                }
            }
            check_exact_set(augmented, order)?;
            debug!(fields = order.len(), "reordering augmented result");
            return Ok(augmented.reordered(order));
        }
        Ok(augmented.clone())
    }

    /// The fields accumulated so far in the current `augment()` call.
    pub fn augmented_so_far(&self) -> &FieldMap {
        self.context.augmented_so_far()
    }
}

/// Two-way exact-set contract: every declared name must be present, and no
/// undeclared name may be.
fn check_exact_set(augmented: &FieldMap, names: &[String]) -> Result<()> {
    if augmented.same_keys(names) {
        return Ok(());
    }
    for name in names {
        if !augmented.contains_key(name) {
            return Err(AugmentError::MissingColumn(name.clone()));
        }
    }
    let declared: HashSet<&str> = names.iter().map(String::as_str).collect();
    for name in augmented.keys() {
        if !declared.contains(name) {
            return Err(AugmentError::UnexpectedColumn(name.to_string()));
        }
    }
    Ok(())
}
