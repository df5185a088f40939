#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial word assignments.
//!
//! An [`Assignment`] maps slots to chosen words. The search never mutates an
//! assignment in place across branches: [`Assignment::extended`] produces a
//! fresh copy with one more entry, so a failed branch cannot leak its
//! speculative choices into a sibling's view.

use crate::csp::variable::Variable;
use itertools::Itertools;
use rustc_hash::FxHashMap;

/// A partial or complete mapping from slot to word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment(FxHashMap<Variable, String>);

impl Assignment {
    /// The empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The word assigned to `var`, if any.
    #[must_use]
    pub fn get(&self, var: Variable) -> Option<&str> {
        self.0.get(&var).map(String::as_str)
    }

    /// Whether `var` has an assigned word.
    #[must_use]
    pub fn contains(&self, var: Variable) -> bool {
        self.0.contains_key(&var)
    }

    /// Number of assigned slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no slot is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new assignment equal to this one plus `var = word`. The receiver is
    /// untouched.
    #[must_use]
    pub fn extended(&self, var: Variable, word: String) -> Self {
        let mut next = self.clone();
        next.0.insert(var, word);
        next
    }

    /// Iterates over the entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, &str)> + Clone {
        self.0.iter().map(|(&var, word)| (var, word.as_str()))
    }

    /// Iterates over the entries sorted by slot, for stable output.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (Variable, &str)> {
        self.iter().sorted_by_key(|&(var, _)| var)
    }
}
