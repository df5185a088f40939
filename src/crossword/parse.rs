#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Parsers for the two puzzle input files.
//!
//! A structure file is a rectangle of text where `_` marks a fillable cell
//! and any other character a blocked one; lines shorter than the widest line
//! are padded with blocked cells. A word list is one candidate word per
//! line, uppercased and deduplicated on load.

use crate::csp::grid::Grid;
use bit_vec::BitVec;
use itertools::Itertools;
use std::path::Path;
use thiserror::Error;

/// Error for [`parse_structure`] and [`load_structure`].
#[derive(Debug, Error)]
pub enum StructureError {
    /// The structure text contained no cells at all.
    #[error("structure contains no cells")]
    Empty,
    /// The structure file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parses structure text into a [`Grid`].
///
/// # Errors
///
/// [`StructureError::Empty`] if the text has no non-empty line.
pub fn parse_structure(text: &str) -> Result<Grid, StructureError> {
    let rows: Vec<&str> = text.lines().collect();
    let height = rows.len();
    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    if height == 0 || width == 0 {
        return Err(StructureError::Empty);
    }

    let mut open = BitVec::from_elem(height * width, false);
    for (r, row) in rows.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            if ch == '_' {
                open.set(r * width + c, true);
            }
        }
    }
    Ok(Grid::new(height, width, open))
}

/// Reads and parses a structure file.
///
/// # Errors
///
/// See [`parse_structure`]; additionally any I/O failure while reading.
pub fn load_structure(path: impl AsRef<Path>) -> Result<Grid, StructureError> {
    let text = std::fs::read_to_string(path)?;
    parse_structure(&text)
}

/// Parses word-list text: one word per line, uppercased, blank lines
/// dropped, duplicates removed, result sorted.
#[must_use]
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .sorted()
        .dedup()
        .collect()
}

/// Reads and parses a word-list file.
///
/// # Errors
///
/// Any I/O failure while reading.
pub fn load_word_list(path: impl AsRef<Path>) -> Result<Vec<String>, std::io::Error> {
    Ok(parse_word_list(&std::fs::read_to_string(path)?))
}
