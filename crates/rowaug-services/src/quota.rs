//! Quota admission control over a possibly nested keyspace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rowaug_model::{AugmentError, Result};

/// One level of a quota tree: either an integer leaf or a named subtree.
///
/// Deserializes from plain JSON, so `{"089": 2, "0871": 1}` and arbitrarily
/// nested variants of it are valid target definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuotaNode {
    Leaf(i64),
    Node(BTreeMap<String, QuotaNode>),
}

impl QuotaNode {
    /// Walks the node along `path`. The empty path addresses the node itself.
    fn lookup(&self, path: &[&str]) -> Option<&QuotaNode> {
        match path.split_first() {
            None => Some(self),
            Some((key, rest)) => match self {
                Self::Leaf(_) => None,
                Self::Node(children) => children.get(*key)?.lookup(rest),
            },
        }
    }

    /// Structural clone with every leaf reset to zero.
    fn zeroed(&self) -> QuotaNode {
        match self {
            Self::Leaf(_) => Self::Leaf(0),
            Self::Node(children) => Self::Node(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.zeroed()))
                    .collect(),
            ),
        }
    }

    fn is_empty_node(&self) -> bool {
        matches!(self, Self::Node(children) if children.is_empty())
    }
}

impl From<i64> for QuotaNode {
    fn from(target: i64) -> Self {
        Self::Leaf(target)
    }
}

impl<V: Into<QuotaNode>> FromIterator<(String, V)> for QuotaNode {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self::Node(
            iter.into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

/// Counts admissions against per-cell targets.
///
/// Targets form a tree of integer leaves addressed by a key path; counts
/// are a structurally identical tree starting at zero. An `add` is admitted
/// when it does not push the cell's count past its target, or when forced.
///
/// Counts are deliberately not clamped: negative amounts are allowed and a
/// forced add may exceed the target. [`is_full`] checks only the upper
/// bound, which keeps deliberate over-quota bookkeeping visible.
///
/// [`is_full`]: QuotaCell::is_full
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaCell {
    targets: QuotaNode,
    counts: QuotaNode,
}

impl QuotaCell {
    /// Builds a cell from a target tree.
    pub fn new(targets: impl Into<QuotaNode>) -> Result<Self> {
        let targets = targets.into();
        if targets.is_empty_node() {
            return Err(AugmentError::Configuration(
                "quota targets must not be empty".to_string(),
            ));
        }
        let counts = targets.zeroed();
        Ok(Self { targets, counts })
    }

    /// The target at `path`, or `default` when the path does not address a
    /// leaf in the target tree.
    pub fn target(&self, path: &[&str], default: i64) -> i64 {
        match self.targets.lookup(path) {
            Some(QuotaNode::Leaf(value)) => *value,
            _ => default,
        }
    }

    /// The count at `path`, or `default` when the path does not address a
    /// leaf in the count tree.
    pub fn count(&self, path: &[&str], default: i64) -> i64 {
        match self.counts.lookup(path) {
            Some(QuotaNode::Leaf(value)) => *value,
            _ => default,
        }
    }

    /// True when `path` exists in the target tree (leaf or subtree).
    pub fn has_target(&self, path: &[&str]) -> bool {
        self.targets.lookup(path).is_some()
    }

    /// Could `amount` be added without exceeding the target?
    ///
    /// Undefined paths have an effective target of zero, so nothing
    /// positive can ever be admitted to a cell that was not declared.
    pub fn can_add(&self, amount: i64, path: &[&str]) -> bool {
        self.count(path, 0) + amount <= self.target(path, 0)
    }

    /// Adds `amount` to the count at `path` if admitted (or `force` is set)
    /// and reports whether the count was changed. A rejected add leaves the
    /// state untouched.
    pub fn add(&mut self, amount: i64, path: &[&str], force: bool) -> bool {
        if !(force || self.can_add(amount, path)) {
            return false;
        }
        match leaf_mut_or_create(&mut self.counts, path) {
            Some(count) => {
                *count += amount;
                true
            }
            // the path runs through an existing leaf; nowhere to put a count
            None => false,
        }
    }

    /// Has the cell at `path` reached (or exceeded) its target?
    ///
    /// Only the upper bound is checked; a negative count is not "full".
    pub fn is_full(&self, path: &[&str]) -> Result<bool> {
        match self.targets.lookup(path) {
            Some(QuotaNode::Leaf(target)) => Ok(self.count(path, 0) >= *target),
            _ => Err(AugmentError::UndefinedKey(path.join("."))),
        }
    }

    pub fn targets(&self) -> &QuotaNode {
        &self.targets
    }

    pub fn counts(&self) -> &QuotaNode {
        &self.counts
    }
}

/// Walks `node` along `path`, creating missing children, and returns the
/// leaf count at the end. Returns `None` when the path runs through or
/// ends on a node of the wrong shape.
fn leaf_mut_or_create<'a>(node: &'a mut QuotaNode, path: &[&str]) -> Option<&'a mut i64> {
    match path.split_first() {
        None => match node {
            QuotaNode::Leaf(value) => Some(value),
            QuotaNode::Node(_) => None,
        },
        Some((key, rest)) => match node {
            QuotaNode::Leaf(_) => None,
            QuotaNode::Node(children) => {
                let child = children.entry((*key).to_string()).or_insert_with(|| {
                    if rest.is_empty() {
                        QuotaNode::Leaf(0)
                    } else {
                        QuotaNode::Node(BTreeMap::new())
                    }
                });
                leaf_mut_or_create(child, rest)
            }
        },
    }
}
