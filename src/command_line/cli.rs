#![allow(clippy::cast_precision_loss)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use crossword_solver::crossword::parse::{load_structure, load_word_list};
use crossword_solver::crossword::render;
use crossword_solver::csp::assignment::Assignment;
use crossword_solver::csp::consistency::{consistent, is_complete};
use crossword_solver::csp::grid::Grid;
use crossword_solver::csp::propagation::initial_arcs;
use crossword_solver::csp::search::{BacktrackingSolver, SearchStats};
use crossword_solver::csp::selection::{
    LeastConstraining, Lexicographic, MinimumRemaining, RandomOrder, Sequential, ValueOrdering,
    VariableSelection,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the crossword solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "crossword-solver", version, about = "A configurable crossword filler")]
pub(crate) struct Cli {
    /// Structure file, when invoked without a subcommand: a text rectangle
    /// where `_` marks a fillable cell.
    pub structure: Option<PathBuf>,

    /// Word-list file, when invoked without a subcommand: one word per line.
    pub words: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `solve`, `dir`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands for the crossword solver.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve one puzzle from a structure file and a word list.
    Solve {
        /// Path to the structure file.
        #[arg(long)]
        structure: PathBuf,

        /// Path to the word-list file.
        #[arg(long)]
        words: PathBuf,

        /// Write the rendered solution to this file as well.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.grid` structure file in a directory against one shared
    /// word list.
    Dir {
        /// Path to the directory of structure files.
        #[arg(long)]
        path: PathBuf,

        /// Path to the word-list file.
        #[arg(long)]
        words: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Enable verification of the found solution against the grid's constraints.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the slot-by-slot assignment alongside the grid.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Which slot to branch on next during the search.
    #[arg(long, default_value_t = SelectionType::Mrv)]
    variable_selection: SelectionType,

    /// In what order to try a slot's candidate words.
    #[arg(long, default_value_t = OrderingType::Lcv)]
    value_ordering: OrderingType,

    /// Seed for the `random` value ordering.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// Selectable variable-ordering heuristics.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectionType {
    /// Minimum remaining values.
    #[default]
    Mrv,
    /// First unassigned slot in grid order.
    Sequential,
}

impl fmt::Display for SelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mrv => write!(f, "mrv"),
            Self::Sequential => write!(f, "sequential"),
        }
    }
}

/// Selectable value-ordering heuristics.
#[derive(ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderingType {
    /// Least-constraining value.
    #[default]
    Lcv,
    /// Lexicographic order.
    Lexicographic,
    /// Seeded random shuffle.
    Random,
}

impl fmt::Display for OrderingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lcv => write!(f, "lcv"),
            Self::Lexicographic => write!(f, "lexicographic"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// Converts the `CommonOptions` into the heuristic implementations required
/// by the solver.
pub(crate) fn get_solver_parts(
    common: &CommonOptions,
) -> (Box<dyn VariableSelection>, Box<dyn ValueOrdering>) {
    let selector: Box<dyn VariableSelection> = match common.variable_selection {
        SelectionType::Mrv => Box::new(MinimumRemaining),
        SelectionType::Sequential => Box::new(Sequential),
    };
    let orderer: Box<dyn ValueOrdering> = match common.value_ordering {
        OrderingType::Lcv => Box::new(LeastConstraining),
        OrderingType::Lexicographic => Box::new(Lexicographic),
        OrderingType::Random => Box::new(RandomOrder::new(common.seed)),
    };
    (selector, orderer)
}

/// Solve a single puzzle file pair.
///
/// # Errors
///
/// If either input file does not exist or fails to parse, or the output
/// file cannot be written.
pub(crate) fn solve_puzzle(
    structure: &Path,
    words_path: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), String> {
    println!("Solving: {}", structure.display());

    let parse_start = std::time::Instant::now();
    let grid = load_structure(structure)
        .map_err(|e| format!("Error parsing structure file {}: {e}", structure.display()))?;
    let words = load_word_list(words_path)
        .map_err(|e| format!("Error reading word list {}: {e}", words_path.display()))?;
    let parse_time = parse_start.elapsed();

    if common.debug {
        println!("Grid: {} x {}", grid.height(), grid.width());
        println!("Slots: {}", grid.variables().len());
        println!("Words: {}", words.len());
    }

    let (sol, elapsed, search_stats, arc_consistent) = solve_impl(&grid, &words, common);

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(&grid, sol.as_ref());
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &grid,
            words.len(),
            search_stats,
            arc_consistent,
            allocated_mib,
            resident_mib,
        );
    }

    if let Some(solution) = sol {
        if common.print_solution {
            for (var, word) in solution.iter_sorted() {
                println!("{var}: {word}");
            }
        }
        print!("{}", render::render(&grid, &solution));
        if let Some(path) = output {
            render::write_text(path, &grid, &solution)
                .map_err(|e| format!("Unable to write {}: {e}", path.display()))?;
            println!("Solution written to: {}", path.display());
        }
    } else {
        println!("No solution.");
    }
    Ok(())
}

/// Solves every `.grid` file under a directory against one word list.
///
/// # Errors
///
/// If any file pair fails to load or solve.
pub(crate) fn solve_dir(
    path: &PathBuf,
    words_path: &Path,
    common: &CommonOptions,
) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "grid") {
            eprintln!("Skipping non-structure file: {}", file_path.display());
            continue;
        }
        solve_puzzle(file_path, words_path, None, common)?;
    }

    Ok(())
}

fn solve_impl(
    grid: &Grid,
    words: &[String],
    common: &CommonOptions,
) -> (Option<Assignment>, Duration, SearchStats, bool) {
    epoch::advance().unwrap();

    let time = std::time::Instant::now();

    let (selector, orderer) = get_solver_parts(common);
    let mut solver = BacktrackingSolver::with_parts(grid, words, selector, orderer);
    let sol = solver.solve();

    let elapsed = time.elapsed();

    if common.debug {
        println!("Solution: {sol:?}");
        println!("Time: {elapsed:?}");
    }

    (sol, elapsed, solver.stats(), solver.is_arc_consistent())
}

/// Verifies a found solution against the grid's constraints.
///
/// Prints whether the verification was successful; panics if it was not.
/// `None` (no solution found) just prints as such.
pub(crate) fn verify_solution(grid: &Grid, sol: Option<&Assignment>) {
    if let Some(solution) = sol {
        let ok = is_complete(grid, solution) && consistent(grid, solution);
        println!("Verified: {ok:?}");
        assert!(ok, "Solution failed verification!");
    } else {
        println!("UNSOLVABLE");
    }
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
#[allow(clippy::too_many_arguments)]
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    grid: &Grid,
    word_count: usize,
    s: SearchStats,
    arc_consistent: bool,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Grid", format!("{} x {}", grid.height(), grid.width()));
    stat_line("Slots", grid.variables().len());
    stat_line("Crossings", initial_arcs(grid).len() / 2);
    stat_line("Words", word_count);

    println!("========================[ Search Statistics ]========================");
    stat_line("Arc consistent", arc_consistent);
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
