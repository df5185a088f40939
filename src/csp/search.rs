#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking search engine.
//!
//! [`BacktrackingSolver`] owns the frozen, propagated domains and performs
//! depth-first search over copy-on-extend assignments: validate, pick a slot
//! with the configured variable heuristic, try its candidates in the
//! configured value order, recurse, and give up on a branch once every
//! candidate fails. The first complete consistent assignment found is
//! returned as-is; `None` means the search space is exhausted and the puzzle
//! has no solution.
//!
//! Recursion depth is bounded by the slot count, which for any printable
//! crossword is far below stack limits. Domains are not re-filtered during
//! the descent; only the single up-front propagation pass prunes them, and
//! the consistency check at each node catches the remaining conflicts.

use crate::csp::assignment::Assignment;
use crate::csp::consistency::{consistent, is_complete};
use crate::csp::domains::{Domains, FrozenDomains};
use crate::csp::grid::Grid;
use crate::csp::propagation::ac3;
use crate::csp::selection::{
    LeastConstraining, MinimumRemaining, ValueOrdering, VariableSelection,
};

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate words tried (one per recursive descent).
    pub decisions: usize,
    /// Candidates whose branch was abandoned.
    pub backtracks: usize,
}

/// A depth-first crossword solver over propagated domains.
///
/// Construction runs node consistency (domain construction) followed by the
/// arc-consistency pass, then freezes the domains; [`Self::solve`] runs the
/// search proper.
#[derive(Debug, Clone)]
pub struct BacktrackingSolver<'a, V = MinimumRemaining, O = LeastConstraining>
where
    V: VariableSelection,
    O: ValueOrdering,
{
    grid: &'a Grid,
    domains: FrozenDomains,
    selector: V,
    orderer: O,
    arc_consistent: bool,
    stats: SearchStats,
}

impl<'a> BacktrackingSolver<'a> {
    /// Creates a solver with the default heuristics: minimum remaining
    /// values and least-constraining value.
    #[must_use]
    pub fn new(grid: &'a Grid, words: &[String]) -> Self {
        Self::with_parts(grid, words, MinimumRemaining, LeastConstraining)
    }
}

impl<'a, V, O> BacktrackingSolver<'a, V, O>
where
    V: VariableSelection,
    O: ValueOrdering,
{
    /// Creates a solver with explicit heuristic implementations.
    #[must_use]
    pub fn with_parts(grid: &'a Grid, words: &[String], selector: V, orderer: O) -> Self {
        let mut domains = Domains::new(grid, words);
        let arc_consistent = ac3(&mut domains, grid, None);
        Self {
            grid,
            domains: domains.freeze(),
            selector,
            orderer,
            arc_consistent,
            stats: SearchStats::default(),
        }
    }

    /// Whether the propagation pass converged without emptying a domain.
    /// Informational: the search itself discovers unsatisfiability either
    /// way, this just reports it early.
    #[must_use]
    pub const fn is_arc_consistent(&self) -> bool {
        self.arc_consistent
    }

    /// Counters from the most recent [`Self::solve`] call.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches for a complete consistent assignment. `None` means no
    /// solution exists for this grid and word list.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.stats = SearchStats::default();
        self.backtrack(&Assignment::new())
    }

    fn backtrack(&mut self, assignment: &Assignment) -> Option<Assignment> {
        if !consistent(self.grid, assignment) {
            return None;
        }
        if is_complete(self.grid, assignment) {
            return Some(assignment.clone());
        }

        let var = self
            .selector
            .pick(self.grid, &self.domains, assignment)?;
        for word in self
            .orderer
            .order(var, self.grid, &self.domains, assignment)
        {
            self.stats.decisions += 1;
            let extended = assignment.extended(var, word);
            if let Some(solution) = self.backtrack(&extended) {
                return Some(solution);
            }
            self.stats.backtracks += 1;
        }
        None
    }
}

/// Convenience entry point: solve `grid` against `words` with the default
/// heuristics.
#[must_use]
pub fn solve(grid: &Grid, words: &[String]) -> Option<Assignment> {
    BacktrackingSolver::new(grid, words).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::grid::tests::grid_from_sketch;
    use crate::csp::selection::{Lexicographic, RandomOrder, Sequential};
    use crate::csp::variable::{Direction, Variable};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    const ACROSS: Variable = Variable::new(0, 0, Direction::Across, 3);
    const DOWN: Variable = Variable::new(0, 0, Direction::Down, 3);

    fn corner_grid() -> Grid {
        grid_from_sketch(&[
            "___", //
            "_##", //
            "_##",
        ])
    }

    #[test]
    fn test_crossing_slots_agree_on_shared_letter() {
        let grid = corner_grid();
        let solution = solve(&grid, &words(&["cat", "dog", "car"])).unwrap();

        let first = solution.get(ACROSS).unwrap();
        let second = solution.get(DOWN).unwrap();
        assert_eq!(first.chars().next(), second.chars().next());
        assert_ne!(first, second);
    }

    #[test]
    fn test_solution_is_complete_and_consistent() {
        let grid = grid_from_sketch(&[
            "_#_", //
            "___", //
            "_#_",
        ]);
        let list = words(&["cat", "car", "can", "ace", "arc", "oak", "nab"]);
        let solution = solve(&grid, &list).unwrap();

        assert!(is_complete(&grid, &solution));
        assert!(consistent(&grid, &solution));
    }

    #[test]
    fn test_disjoint_slots_need_distinct_words() {
        // Two separate slots but only one word of the right length.
        let grid = grid_from_sketch(&[
            "___", //
            "###", //
            "___",
        ]);
        assert_eq!(solve(&grid, &words(&["cat"])), None);
    }

    #[test]
    fn test_unfillable_length_fails() {
        let grid = grid_from_sketch(&["_____"]);
        let mut solver = BacktrackingSolver::new(&grid, &words(&["cat", "dog"]));
        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn test_search_proceeds_despite_failed_propagation() {
        let grid = grid_from_sketch(&[
            "___", //
            "_##", //
            "_##", //
            "_##",
        ]);
        // "dim" and "oaks" disagree at the crossing: propagation empties a
        // domain, and the search then fails on its own.
        let mut solver = BacktrackingSolver::new(&grid, &words(&["dim", "oaks"]));
        assert!(!solver.is_arc_consistent());
        assert_eq!(solver.solve(), None);
    }

    #[test]
    fn test_all_heuristic_pairs_agree_on_solvability() {
        let grid = grid_from_sketch(&[
            "_#_", //
            "___", //
            "_#_",
        ]);
        let list = words(&["cat", "car", "can", "ace", "arc", "oak", "nab"]);

        let with_defaults = solve(&grid, &list);
        assert!(with_defaults.is_some());

        let mut sequential =
            BacktrackingSolver::with_parts(&grid, &list, Sequential, Lexicographic);
        assert!(sequential.solve().is_some());

        let mut randomized =
            BacktrackingSolver::with_parts(&grid, &list, MinimumRemaining, RandomOrder::new(3));
        assert!(randomized.solve().is_some());
    }

    #[test]
    fn test_stats_count_decisions() {
        let grid = corner_grid();
        let mut solver = BacktrackingSolver::new(&grid, &words(&["cat", "car", "dog"]));
        let solution = solver.solve();
        assert!(solution.is_some());
        assert!(solver.stats().decisions >= 2);
        assert!(solver.stats().decisions > solver.stats().backtracks);
    }

    #[test]
    fn test_solver_is_deterministic() {
        let grid = grid_from_sketch(&[
            "_#_", //
            "___", //
            "_#_",
        ]);
        let list = words(&["cat", "car", "can", "ace", "arc", "oak", "nab"]);
        assert_eq!(solve(&grid, &list), solve(&grid, &list));
    }
}
