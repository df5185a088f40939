#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The geometry model of a puzzle.
//!
//! A [`Grid`] owns everything about a puzzle that is static during solving:
//! the rectangle of open and blocked cells, the slots derived from maximal
//! runs of open cells, and the overlap map recording where two slots share a
//! cell. All of it is computed once at construction and read-only afterwards.

use crate::csp::variable::{Cell, Direction, Variable};
use bit_vec::BitVec;
use itertools::Itertools;
use rustc_hash::FxHashMap;

/// Where two slots cross: the shared cell is character `own` of the first
/// slot's word and character `other` of the second slot's word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    /// Character index of the shared cell within the first slot.
    pub own: usize,
    /// Character index of the shared cell within the second slot.
    pub other: usize,
}

/// A crossword grid: dimensions, open-cell matrix, derived slots and the
/// symmetric overlap map between them.
#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    open: BitVec,
    variables: Vec<Variable>,
    overlaps: FxHashMap<(Variable, Variable), Overlap>,
    neighbors: FxHashMap<Variable, Vec<Variable>>,
}

impl Grid {
    /// Builds a grid from its dimensions and row-major open-cell matrix.
    ///
    /// Slots are the maximal horizontal and vertical runs of open cells of
    /// length two or more. For every pair of slots sharing a cell, the
    /// overlap map records the character index of that cell within each
    /// slot's word, in both key orders.
    ///
    /// # Panics
    ///
    /// If `open.len() != height * width`.
    #[must_use]
    pub fn new(height: usize, width: usize, open: BitVec) -> Self {
        assert_eq!(
            open.len(),
            height * width,
            "open-cell matrix must cover the full grid"
        );

        let mut grid = Self {
            height,
            width,
            open,
            variables: Vec::new(),
            overlaps: FxHashMap::default(),
            neighbors: FxHashMap::default(),
        };
        grid.derive_variables();
        grid.derive_overlaps();
        grid
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether `(row, col)` is an open (fillable) cell.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        let (row, col) = cell;
        row < self.height && col < self.width && self.open[row * self.width + col]
    }

    /// All slots, ordered by (row, column, direction).
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The crossing between `x` and `y`, if their cells intersect.
    #[must_use]
    pub fn overlap(&self, x: Variable, y: Variable) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// The slots that share a cell with `x`, in stable order.
    #[must_use]
    pub fn neighbors(&self, x: Variable) -> &[Variable] {
        self.neighbors.get(&x).map_or(&[], Vec::as_slice)
    }

    fn derive_variables(&mut self) {
        for row in 0..self.height {
            for col in 0..self.width {
                if !self.is_open((row, col)) {
                    continue;
                }

                // A maximal run starts at a cell with no open predecessor.
                if col == 0 || !self.is_open((row, col - 1)) {
                    let length = (col..self.width)
                        .take_while(|&c| self.is_open((row, c)))
                        .count();
                    if length > 1 {
                        self.variables
                            .push(Variable::new(row, col, Direction::Across, length));
                    }
                }

                if row == 0 || !self.is_open((row - 1, col)) {
                    let length = (row..self.height)
                        .take_while(|&r| self.is_open((r, col)))
                        .count();
                    if length > 1 {
                        self.variables
                            .push(Variable::new(row, col, Direction::Down, length));
                    }
                }
            }
        }
        self.variables.sort_unstable();
    }

    fn derive_overlaps(&mut self) {
        for (&x, &y) in self.variables.iter().tuple_combinations() {
            let cells_x = x.cells();
            let cells_y = y.cells();
            let shared = cells_x
                .iter()
                .enumerate()
                .find_map(|(i, cell)| cells_y.iter().position(|c| c == cell).map(|j| (i, j)));

            if let Some((i, j)) = shared {
                self.overlaps.insert((x, y), Overlap { own: i, other: j });
                self.overlaps.insert((y, x), Overlap { own: j, other: i });
                self.neighbors.entry(x).or_default().push(y);
                self.neighbors.entry(y).or_default().push(x);
            }
        }
        for adjacent in self.neighbors.values_mut() {
            adjacent.sort_unstable();
        }
    }
}
