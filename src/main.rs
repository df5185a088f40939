//! # crossword-solver
//!
//! A command-line crossword filler. Puzzles are given as a structure file
//! (a text rectangle where `_` marks a fillable cell and anything else a
//! blocked one) plus a word list (one candidate word per line). The solver
//! prunes per-slot candidate domains with node and arc consistency, then
//! runs heuristic backtracking search and prints the filled grid, or
//! `No solution.` when the word list cannot fill the structure.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a puzzle
//! crossword-solver puzzle.grid words.txt
//!
//! # The same, spelled out, writing the filled grid to a file
//! crossword-solver solve --structure puzzle.grid --words words.txt -o filled.txt
//!
//! # Solve every .grid file in a directory against one word list
//! crossword-solver dir --path puzzles/ --words words.txt
//!
//! # Pick different search heuristics
//! crossword-solver puzzle.grid words.txt --variable-selection sequential --value-ordering random --seed 7
//! ```
//!
//! Common options: `-d/--debug`, `-v/--verify`, `-s/--stats`,
//! `-p/--print-solution`, `--variable-selection {mrv|sequential}`,
//! `--value-ordering {lcv|lexicographic|random}`, `--seed N`.

use clap::{CommandFactory, Parser};

use crate::command_line::cli::{Cli, Commands, solve_dir, solve_puzzle};

mod command_line;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    // Handle the case where a structure/word-list pair is provided globally
    // without a subcommand.
    if let (Some(structure), Some(words), None) = (&cli.structure, &cli.words, &cli.command) {
        if let Err(e) = solve_puzzle(structure, words, None, &cli.common) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        return;
    }

    match cli.command {
        Some(Commands::Solve {
            structure,
            words,
            output,
            common,
        }) => {
            if let Err(e) = solve_puzzle(&structure, &words, output.as_deref(), &common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }

        Some(Commands::Dir {
            path,
            words,
            common,
        }) => {
            if let Err(e) = solve_dir(&path, &words, &common) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}
