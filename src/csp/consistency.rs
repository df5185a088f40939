#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The consistency and completeness checks backing the search.
//!
//! [`consistent`] validates a partial assignment against all three
//! constraints: word lengths match their slots, no word is used twice
//! anywhere in the grid, and crossing slots agree on the shared character.
//! [`is_complete`] holds once every slot has a word. A returned solution
//! satisfies both.

use crate::csp::assignment::Assignment;
use crate::csp::grid::Grid;
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// Whether the assigned words fit their slots without conflicts.
#[must_use]
pub fn consistent(grid: &Grid, assignment: &Assignment) -> bool {
    let mut used = FxHashSet::default();
    for (var, word) in assignment.iter() {
        if word.chars().count() != var.length {
            return false;
        }
        if !used.insert(word) {
            return false;
        }
    }

    assignment.iter().tuple_combinations().all(|((x, wx), (y, wy))| {
        grid.overlap(x, y).is_none_or(|overlap| {
            wx.chars().nth(overlap.own) == wy.chars().nth(overlap.other)
        })
    })
}

/// Whether every slot of the grid has an assigned word.
#[must_use]
pub fn is_complete(grid: &Grid, assignment: &Assignment) -> bool {
    grid.variables().iter().all(|&var| assignment.contains(var))
}
