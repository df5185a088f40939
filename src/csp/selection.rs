#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Ordering heuristics for the backtracking search.
//!
//! Two pluggable decisions: which unassigned slot to branch on next
//! ([`VariableSelection`]) and in what order to try that slot's candidate
//! words ([`ValueOrdering`]). Every implementation breaks ties
//! deterministically so a given puzzle always searches the same tree.

use crate::csp::assignment::Assignment;
use crate::csp::domains::FrozenDomains;
use crate::csp::grid::Grid;
use crate::csp::variable::{Direction, Variable};
use itertools::Itertools;

/// Picks the next slot to branch on. Must never return an assigned slot;
/// returns `None` only when every slot is assigned.
pub trait VariableSelection {
    /// The slot to try next given the current partial assignment.
    fn pick(
        &self,
        grid: &Grid,
        domains: &FrozenDomains,
        assignment: &Assignment,
    ) -> Option<Variable>;
}

/// Orders the candidate words for a slot. Implementations reorder the full
/// domain, they never drop a candidate.
pub trait ValueOrdering {
    /// The candidates of `var`, in the order the search should try them.
    fn order(
        &self,
        var: Variable,
        grid: &Grid,
        domains: &FrozenDomains,
        assignment: &Assignment,
    ) -> Vec<String>;
}

impl<T: VariableSelection + ?Sized> VariableSelection for Box<T> {
    fn pick(
        &self,
        grid: &Grid,
        domains: &FrozenDomains,
        assignment: &Assignment,
    ) -> Option<Variable> {
        (**self).pick(grid, domains, assignment)
    }
}

impl<T: ValueOrdering + ?Sized> ValueOrdering for Box<T> {
    fn order(
        &self,
        var: Variable,
        grid: &Grid,
        domains: &FrozenDomains,
        assignment: &Assignment,
    ) -> Vec<String> {
        (**self).order(var, grid, domains, assignment)
    }
}

/// Minimum-remaining-values: branch on the unassigned slot with the fewest
/// candidates left, ties broken by slot position.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumRemaining;

impl VariableSelection for MinimumRemaining {
    fn pick(
        &self,
        grid: &Grid,
        domains: &FrozenDomains,
        assignment: &Assignment,
    ) -> Option<Variable> {
        grid.variables()
            .iter()
            .filter(|&&var| !assignment.contains(var))
            .min_by_key(|&&var| (domains.candidates(var).len(), var))
            .copied()
    }
}

/// Branches on the first unassigned slot in grid order, ignoring domain
/// sizes. Mostly useful as a baseline against [`MinimumRemaining`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl VariableSelection for Sequential {
    fn pick(
        &self,
        grid: &Grid,
        _domains: &FrozenDomains,
        assignment: &Assignment,
    ) -> Option<Variable> {
        grid.variables()
            .iter()
            .find(|&&var| !assignment.contains(var))
            .copied()
    }
}

/// Least-constraining-value: try first the word that rules out the fewest
/// candidates among unassigned crossing slots, ties broken lexicographically.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastConstraining;

impl LeastConstraining {
    /// How many neighbor candidates choosing `word` for `var` would rule out.
    fn eliminated(
        word: &str,
        var: Variable,
        grid: &Grid,
        domains: &FrozenDomains,
        assignment: &Assignment,
    ) -> usize {
        grid.neighbors(var)
            .iter()
            .filter(|&&other| !assignment.contains(other))
            .map(|&other| {
                let Some(overlap) = grid.overlap(var, other) else {
                    return 0;
                };
                let own = word.chars().nth(overlap.own);
                domains
                    .candidates(other)
                    .iter()
                    .filter(|candidate| candidate.chars().nth(overlap.other) != own)
                    .count()
            })
            .sum()
    }
}

impl ValueOrdering for LeastConstraining {
    fn order(
        &self,
        var: Variable,
        grid: &Grid,
        domains: &FrozenDomains,
        assignment: &Assignment,
    ) -> Vec<String> {
        domains
            .candidates(var)
            .iter()
            .map(|word| {
                let count = Self::eliminated(word, var, grid, domains, assignment);
                (count, word.clone())
            })
            .sorted()
            .map(|(_, word)| word)
            .collect()
    }
}

/// Plain lexicographic order, the cheapest deterministic baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicographic;

impl ValueOrdering for Lexicographic {
    fn order(
        &self,
        var: Variable,
        _grid: &Grid,
        domains: &FrozenDomains,
        _assignment: &Assignment,
    ) -> Vec<String> {
        domains.candidates(var).to_vec()
    }
}

/// Seeded random order: a reproducible shuffle of the domain, for probing
/// how sensitive a puzzle is to value order.
#[derive(Debug, Clone, Copy)]
pub struct RandomOrder {
    seed: u64,
}

impl RandomOrder {
    /// Creates an ordering whose shuffles are determined by `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl ValueOrdering for RandomOrder {
    fn order(
        &self,
        var: Variable,
        _grid: &Grid,
        domains: &FrozenDomains,
        _assignment: &Assignment,
    ) -> Vec<String> {
        let mut values = domains.candidates(var).to_vec();
        let mut rng = fastrand::Rng::with_seed(self.seed ^ mix(var));
        rng.shuffle(&mut values);
        values
    }
}

/// Folds a slot identity into the shuffle seed so distinct slots are not
/// shuffled identically.
fn mix(var: Variable) -> u64 {
    let direction = match var.direction {
        Direction::Across => 0u64,
        Direction::Down => 1u64,
    };
    (var.row as u64)
        .wrapping_mul(0x9e37_79b9_7f4a_7c15)
        .wrapping_add((var.col as u64).wrapping_mul(0xff51_afd7_ed55_8ccd))
        .wrapping_add(direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::domains::Domains;
    use crate::csp::grid::tests::grid_from_sketch;
    use crate::csp::variable::Direction;
    use itertools::Itertools;

    const ACROSS: Variable = Variable::new(0, 0, Direction::Across, 3);
    const DOWN: Variable = Variable::new(0, 0, Direction::Down, 3);

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    fn corner_grid() -> Grid {
        grid_from_sketch(&[
            "___", //
            "_##", //
            "_##",
        ])
    }

    #[test]
    fn test_mrv_prefers_smaller_domain() {
        let grid = corner_grid();
        let mut domains = Domains::new(&grid, &words(&["cat", "car", "dog"]));
        domains.retain(DOWN, |w| w == "cat");
        let domains = domains.freeze();

        let picked = MinimumRemaining.pick(&grid, &domains, &Assignment::new());
        assert_eq!(picked, Some(DOWN));
    }

    #[test]
    fn test_mrv_never_picks_above_minimum() {
        let grid = grid_from_sketch(&[
            "_#_", //
            "___", //
            "_#_",
        ]);
        let domains = Domains::new(&grid, &words(&["cat", "car", "dog", "ore"])).freeze();
        let assignment = Assignment::new();

        let picked = MinimumRemaining.pick(&grid, &domains, &assignment).unwrap();
        let minimum = grid
            .variables()
            .iter()
            .filter(|&&v| !assignment.contains(v))
            .map(|&v| domains.candidates(v).len())
            .min()
            .unwrap();
        assert_eq!(domains.candidates(picked).len(), minimum);
    }

    #[test]
    fn test_mrv_skips_assigned_slots() {
        let grid = corner_grid();
        let mut domains = Domains::new(&grid, &words(&["cat", "car", "dog"]));
        domains.retain(DOWN, |w| w == "cat");
        let domains = domains.freeze();

        let assignment = Assignment::new().extended(DOWN, "cat".to_string());
        let picked = MinimumRemaining.pick(&grid, &domains, &assignment);
        assert_eq!(picked, Some(ACROSS));

        let full = assignment.extended(ACROSS, "car".to_string());
        assert_eq!(MinimumRemaining.pick(&grid, &domains, &full), None);
    }

    #[test]
    fn test_sequential_follows_grid_order() {
        let grid = corner_grid();
        let domains = Domains::new(&grid, &words(&["cat"])).freeze();
        let picked = Sequential.pick(&grid, &domains, &Assignment::new());
        assert_eq!(picked, Some(ACROSS));
    }

    #[test]
    fn test_lcv_orders_least_constraining_first() {
        let grid = corner_grid();
        // DOWN's candidates start with c, c, o: choosing "oak" for ACROSS
        // would rule out both c-words, so c-words come first for ACROSS.
        let domains = Domains::new(&grid, &words(&["cat", "car", "oak"])).freeze();

        let ordered = LeastConstraining.order(ACROSS, &grid, &domains, &Assignment::new());
        assert_eq!(ordered, vec!["car", "cat", "oak"]);
    }

    #[test]
    fn test_lcv_ignores_assigned_neighbors() {
        let grid = corner_grid();
        let domains = Domains::new(&grid, &words(&["cat", "car", "oak"])).freeze();
        let assignment = Assignment::new().extended(DOWN, "oak".to_string());

        // With DOWN assigned, nothing constrains ACROSS: falls back to ties,
        // broken lexicographically.
        let ordered = LeastConstraining.order(ACROSS, &grid, &domains, &assignment);
        assert_eq!(ordered, vec!["car", "cat", "oak"]);
    }

    #[test]
    fn test_orderings_return_permutations() {
        let grid = corner_grid();
        let domains = Domains::new(&grid, &words(&["cat", "car", "oak", "dim"])).freeze();
        let assignment = Assignment::new();
        let expected: Vec<String> = domains.candidates(ACROSS).to_vec();

        for ordered in [
            LeastConstraining.order(ACROSS, &grid, &domains, &assignment),
            Lexicographic.order(ACROSS, &grid, &domains, &assignment),
            RandomOrder::new(7).order(ACROSS, &grid, &domains, &assignment),
        ] {
            assert_eq!(
                ordered.iter().sorted().collect_vec(),
                expected.iter().sorted().collect_vec()
            );
        }
    }

    #[test]
    fn test_random_order_is_reproducible() {
        let grid = corner_grid();
        let domains = Domains::new(&grid, &words(&["cat", "car", "oak", "dim"])).freeze();
        let assignment = Assignment::new();

        let first = RandomOrder::new(42).order(ACROSS, &grid, &domains, &assignment);
        let second = RandomOrder::new(42).order(ACROSS, &grid, &domains, &assignment);
        assert_eq!(first, second);
    }
}
