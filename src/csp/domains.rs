#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Candidate-word domains.
//!
//! [`Domains`] maps every slot to the words still considered possible for
//! it. Construction applies the node-consistency filter (only words of the
//! slot's exact length survive); after that the store is mutated only by the
//! arc-consistency pass, then handed to the search as a [`FrozenDomains`]
//! that exposes no mutation at all. Candidate lists are kept sorted so every
//! later iteration over a domain is deterministic.

use crate::csp::grid::Grid;
use crate::csp::variable::Variable;
use itertools::Itertools;
use rustc_hash::FxHashMap;

/// Mutable per-slot candidate store, alive only between construction and the
/// end of propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains(FxHashMap<Variable, Vec<String>>);

impl Domains {
    /// Builds the initial domains from a word list, keeping for each slot
    /// exactly the words whose character count equals the slot's length.
    ///
    /// A slot with no word of its length gets an empty domain; that is a
    /// legitimate unsatisfiable input, surfaced later as search failure.
    #[must_use]
    pub fn new(grid: &Grid, words: &[String]) -> Self {
        let store = grid
            .variables()
            .iter()
            .map(|&var| {
                let candidates = words
                    .iter()
                    .filter(|word| word.chars().count() == var.length)
                    .cloned()
                    .sorted()
                    .dedup()
                    .collect();
                (var, candidates)
            })
            .collect();
        Self(store)
    }

    /// The candidate words currently possible for `var`, sorted.
    #[must_use]
    pub fn candidates(&self, var: Variable) -> &[String] {
        self.0.get(&var).map_or(&[], Vec::as_slice)
    }

    /// Drops every candidate of `var` that fails `keep`, preserving order.
    /// Returns whether the domain shrank.
    pub(crate) fn retain<F>(&mut self, var: Variable, keep: F) -> bool
    where
        F: FnMut(&String) -> bool,
    {
        self.0.get_mut(&var).is_some_and(|candidates| {
            let before = candidates.len();
            candidates.retain(keep);
            candidates.len() < before
        })
    }

    /// Ends the propagation phase: the returned view is read-only for the
    /// lifetime of the search.
    #[must_use]
    pub fn freeze(self) -> FrozenDomains {
        FrozenDomains(self)
    }
}

/// Read-only domain view consumed by the search. Constructed exclusively via
/// [`Domains::freeze`], after which no code path can shrink or grow a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenDomains(Domains);

impl FrozenDomains {
    /// The candidate words for `var`, sorted.
    #[must_use]
    pub fn candidates(&self, var: Variable) -> &[String] {
        self.0.candidates(var)
    }
}
