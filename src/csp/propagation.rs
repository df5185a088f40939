#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Arc-consistency propagation.
//!
//! Pairwise domain filtering over the overlap constraints, run once before
//! the search. [`revise`] makes a single slot arc-consistent with one
//! neighbor; [`ac3`] drives revisions from a FIFO worklist until the domains
//! reach a fixed point. Propagation never touches assignment state; a
//! not-consistent result means some domain emptied and the puzzle as
//! constrained has no solution.

use crate::csp::domains::Domains;
use crate::csp::grid::Grid;
use crate::csp::variable::Variable;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Every ordered neighbor pair of the grid, the default worklist seed.
#[must_use]
pub fn initial_arcs(grid: &Grid) -> Vec<(Variable, Variable)> {
    grid.variables()
        .iter()
        .flat_map(|&x| grid.neighbors(x).iter().map(move |&y| (x, y)))
        .collect()
}

/// Makes `x` arc-consistent with `y`: removes from `x`'s domain every word
/// with no partner in `y`'s domain agreeing at the crossing. Returns whether
/// `x`'s domain changed; a pair without a crossing is a no-op.
pub fn revise(domains: &mut Domains, grid: &Grid, x: Variable, y: Variable) -> bool {
    let Some(overlap) = grid.overlap(x, y) else {
        return false;
    };

    let supported: FxHashSet<char> = domains
        .candidates(y)
        .iter()
        .filter_map(|word| word.chars().nth(overlap.other))
        .collect();

    domains.retain(x, |word| {
        word.chars()
            .nth(overlap.own)
            .is_some_and(|ch| supported.contains(&ch))
    })
}

/// Runs the worklist algorithm to a fixed point, starting from `arcs` or,
/// when `None`, from [`initial_arcs`].
///
/// Arcs are processed first-in-first-out. When a revision shrinks `x`'s
/// domain, every arc `(z, x)` for a neighbor `z` of `x` is re-enqueued
/// unless that exact ordered pair is already waiting. Returns `false` as
/// soon as a domain empties, `true` once the worklist drains.
pub fn ac3(domains: &mut Domains, grid: &Grid, arcs: Option<Vec<(Variable, Variable)>>) -> bool {
    let mut worklist: VecDeque<(Variable, Variable)> =
        arcs.unwrap_or_else(|| initial_arcs(grid)).into();
    let mut queued: FxHashSet<(Variable, Variable)> = worklist.iter().copied().collect();

    while let Some((x, y)) = worklist.pop_front() {
        queued.remove(&(x, y));
        if revise(domains, grid, x, y) {
            if domains.candidates(x).is_empty() {
                return false;
            }
            for &z in grid.neighbors(x) {
                if queued.insert((z, x)) {
                    worklist.push_back((z, x));
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::grid::tests::grid_from_sketch;
    use crate::csp::variable::{Direction, Variable};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    /// Two length-3 slots crossing at their first character.
    fn corner_grid() -> Grid {
        grid_from_sketch(&[
            "___", //
            "_##", //
            "_##",
        ])
    }

    const ACROSS: Variable = Variable::new(0, 0, Direction::Across, 3);
    const DOWN: Variable = Variable::new(0, 0, Direction::Down, 3);

    #[test]
    fn test_revise_removes_unsupported_words() {
        let grid = corner_grid();
        let mut domains = Domains::new(&grid, &words(&["cat", "car", "dog"]));
        // DOWN keeps everything for now; ACROSS must start with a letter some
        // DOWN word starts with, which all of them do. Shrink DOWN first.
        assert!(domains.retain(DOWN, |w| w == "cat"));

        assert!(revise(&mut domains, &grid, ACROSS, DOWN));
        assert_eq!(domains.candidates(ACROSS), &["car", "cat"]);
    }

    #[test]
    fn test_revise_without_overlap_is_noop() {
        let grid = grid_from_sketch(&[
            "___", //
            "###", //
            "___",
        ]);
        let top = Variable::new(0, 0, Direction::Across, 3);
        let bottom = Variable::new(2, 0, Direction::Across, 3);
        let mut domains = Domains::new(&grid, &words(&["cat", "dog"]));

        assert!(!revise(&mut domains, &grid, top, bottom));
        assert_eq!(domains.candidates(top), &["cat", "dog"]);
    }

    #[test]
    fn test_revise_is_monotonic_and_idempotent() {
        let grid = corner_grid();
        let mut domains = Domains::new(&grid, &words(&["cat", "car", "oak", "dim"]));
        domains.retain(DOWN, |w| w.starts_with('c') || w.starts_with('o'));

        let before: Vec<String> = domains.candidates(ACROSS).to_vec();
        revise(&mut domains, &grid, ACROSS, DOWN);
        let after: Vec<String> = domains.candidates(ACROSS).to_vec();
        assert!(after.iter().all(|w| before.contains(w)));

        // A second call at the fixed point changes nothing.
        assert!(!revise(&mut domains, &grid, ACROSS, DOWN));
        assert_eq!(domains.candidates(ACROSS), after.as_slice());
    }

    #[test]
    fn test_ac3_reaches_fixed_point() {
        let grid = corner_grid();
        let mut domains = Domains::new(&grid, &words(&["cat", "car", "dog", "ore"]));

        assert!(ac3(&mut domains, &grid, None));
        let first: Domains = domains.clone();
        assert!(ac3(&mut domains, &grid, None));
        assert_eq!(domains, first);
    }

    #[test]
    fn test_ac3_signals_emptied_domain() {
        let grid = corner_grid();
        // No remaining ACROSS word starts with the only DOWN word's letter.
        let mut domains = Domains::new(&grid, &words(&["cat", "car", "oak"]));
        domains.retain(DOWN, |w| w == "oak");
        domains.retain(ACROSS, |w| w != "oak");

        assert!(!ac3(&mut domains, &grid, None));
        let emptied = grid
            .variables()
            .iter()
            .any(|&v| domains.candidates(v).is_empty());
        assert!(emptied);
    }

    #[test]
    fn test_ac3_accepts_explicit_arcs() {
        let grid = corner_grid();
        let mut domains = Domains::new(&grid, &words(&["cat", "car", "dog"]));
        domains.retain(DOWN, |w| w == "cat");

        assert!(ac3(&mut domains, &grid, Some(vec![(ACROSS, DOWN)])));
        assert_eq!(domains.candidates(ACROSS), &["car", "cat"]);
    }

    #[test]
    fn test_initial_arcs_cover_both_directions() {
        let grid = corner_grid();
        let arcs = initial_arcs(&grid);
        assert!(arcs.contains(&(ACROSS, DOWN)));
        assert!(arcs.contains(&(DOWN, ACROSS)));
        assert_eq!(arcs.len(), 2);
    }
}
