#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Rendering a (partial) assignment back onto the grid.

use crate::csp::assignment::Assignment;
use crate::csp::grid::Grid;
use crate::csp::variable::Direction;
use std::io::Write;
use std::path::Path;

/// The letters an assignment places on each cell, row-major; `None` for
/// blocked or still-empty cells.
#[must_use]
pub fn letter_grid(grid: &Grid, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; grid.width()]; grid.height()];
    for (var, word) in assignment.iter() {
        for (k, ch) in word.chars().enumerate() {
            let (row, col) = match var.direction {
                Direction::Across => (var.row, var.col + k),
                Direction::Down => (var.row + k, var.col),
            };
            letters[row][col] = Some(ch);
        }
    }
    letters
}

/// Renders the filled grid as text: `█` for blocked cells, the assigned
/// letter (or a space) for open ones.
#[must_use]
pub fn render(grid: &Grid, assignment: &Assignment) -> String {
    let letters = letter_grid(grid, assignment);
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.is_open((row, col)) {
                out.push(letters[row][col].unwrap_or(' '));
            } else {
                out.push('█');
            }
        }
        out.push('\n');
    }
    out
}

/// Writes the rendered grid to a file.
///
/// # Errors
///
/// Any I/O failure while creating or writing the file.
pub fn write_text(
    path: impl AsRef<Path>,
    grid: &Grid,
    assignment: &Assignment,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render(grid, assignment).as_bytes())
}
