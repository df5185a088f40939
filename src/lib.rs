#![warn(missing_docs)]
//! This crate fills crossword grids by treating the fill as a constraint
//! satisfaction problem: per-slot candidate domains are pruned by node and
//! arc consistency, then a heuristic backtracking search produces a complete
//! assignment of words to slots, or reports that none exists.

/// The `csp` module implements the constraint solver: variables, domains,
/// arc-consistency propagation and backtracking search.
pub mod csp;

/// The `crossword` module implements the puzzle frontend: structure and
/// word-list parsing, and rendering of a solved grid.
pub mod crossword;
