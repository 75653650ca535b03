//! Command-line interface for solving puzzle definition files

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;

use crate::algorithm::engine::{BacktrackingSearch, PlacementRecord, SearchStep, StepKind};
use crate::analysis::validation::validate_puzzle;
use crate::io::configuration::PUZZLE_EXTENSION;
use crate::io::error::{Result, SolverError};
use crate::io::progress::ProgressManager;
use crate::io::puzzle::PuzzleDefinition;
use crate::spatial::board::Board;
use crate::spatial::cell::Cell;

#[derive(Parser)]
#[command(name = "polysolve")]
#[command(
    author,
    version,
    about = "Solve polyomino tiling puzzles by exhaustive backtracking"
)]
/// Command-line arguments for the puzzle solver
pub struct Cli {
    /// Puzzle JSON file or directory of puzzle files to solve
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Print every place/remove step as it happens
    #[arg(short, long)]
    pub trace: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Abort the search after this many steps
    #[arg(short = 's', long)]
    pub max_steps: Option<u64>,
}

impl Cli {
    /// Check if progress should be displayed
    ///
    /// Tracing already prints one line per step, so the spinner only runs
    /// when neither quiet nor trace mode is active.
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && !self.trace
    }
}

/// How a single puzzle run ended
enum Outcome {
    Solved,
    NoSolution,
    BudgetExhausted,
}

/// Orchestrates solving of puzzle files with progress tracking
pub struct PuzzleRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl PuzzleRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve every puzzle file named by the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target collection, puzzle loading, or the
    /// search itself fails.
    pub fn run(&self) -> Result<()> {
        let files = self.collect_files()?;

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(pm) = &self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            return Ok(vec![self.cli.target.clone()]);
        }

        if !self.cli.target.is_dir() {
            return Err(SolverError::PuzzleFormat {
                reason: format!(
                    "target '{}' is neither a puzzle file nor a directory",
                    self.cli.target.display()
                ),
            });
        }

        let entries =
            std::fs::read_dir(&self.cli.target).map_err(|source| SolverError::FileSystem {
                path: self.cli.target.clone(),
                operation: "read_dir",
                source,
            })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| SolverError::FileSystem {
                    path: self.cli.target.clone(),
                    operation: "read_dir",
                    source,
                })?
                .path();
            if path.extension().and_then(|s| s.to_str()) == Some(PUZZLE_EXTENSION) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    // Result reporting goes straight to stdout
    #[allow(clippy::print_stdout)]
    fn process_file(&self, path: &Path) -> Result<()> {
        let start_time = Instant::now();
        let definition = PuzzleDefinition::load(path)?;
        let board = definition.board()?;
        let pieces = definition.piece_multiset()?;

        for finding in validate_puzzle(&board, &pieces) {
            log::warn!("{}: {finding}", definition.name);
        }

        if let Some(pm) = &self.progress_manager {
            pm.start_file(path);
        }

        let mut search = BacktrackingSearch::new(board, &pieces);
        let outcome = loop {
            if let Some(limit) = self.cli.max_steps {
                if search.step_count() >= limit {
                    search.cancel();
                    break Outcome::BudgetExhausted;
                }
            }

            let step = search.step()?;

            if self.cli.trace {
                println!("{}", trace_line(&step));
            }
            if let Some(pm) = &self.progress_manager {
                pm.update_steps(step.step_count, step.placements.len());
            }

            match step.kind {
                StepKind::Solved => break Outcome::Solved,
                StepKind::NoSolution => break Outcome::NoSolution,
                StepKind::Place | StepKind::Remove => {}
            }
        };

        let steps = search.step_count();
        let summary = match outcome {
            Outcome::Solved => format!("{}: solved in {steps} steps", definition.name),
            Outcome::NoSolution => {
                format!("{}: no solution ({steps} steps searched)", definition.name)
            }
            Outcome::BudgetExhausted => {
                format!("{}: step budget exhausted after {steps} steps", definition.name)
            }
        };

        if let Some(pm) = &self.progress_manager {
            pm.finish_file(&summary);
        } else {
            println!("{summary}");
        }

        if matches!(outcome, Outcome::Solved) {
            println!("{}", format_board(search.board(), search.placements()));
        }

        log::debug!("{} finished in {:.2?}", path.display(), start_time.elapsed());
        Ok(())
    }
}

/// One-line description of a search step for trace output
fn trace_line(step: &SearchStep<'_>) -> String {
    match step.kind {
        StepKind::Place => step.placements.last().map_or_else(
            || format!("[{:>8}] place", step.step_count),
            |record| {
                format!(
                    "[{:>8}] place {} cells at {}",
                    step.step_count,
                    record.orientation.area(),
                    record.origin
                )
            },
        ),
        StepKind::Remove => format!("[{:>8}] remove", step.step_count),
        StepKind::Solved => format!("[{:>8}] solved", step.step_count),
        StepKind::NoSolution => format!("[{:>8}] no solution", step.step_count),
    }
}

/// Render the board as a letter grid, one letter per placement
///
/// Placements are lettered `A`, `B`, ... in the order they were made;
/// blocked cells print as `#` and empty cells as `.`.
fn format_board(board: &Board, placements: &[PlacementRecord]) -> String {
    let mut glyphs: HashMap<Cell, char> = HashMap::new();
    for (index, record) in placements.iter().enumerate() {
        let letter = char::from(b'A' + (index % 26) as u8);
        for cell in record.orientation.cells_at(record.origin) {
            glyphs.insert(cell, letter);
        }
    }

    let mut out = String::new();
    for row in 0..board.height() as i32 {
        for col in 0..board.width() as i32 {
            let cell = Cell::new(row, col);
            let glyph = if board.is_blocked(cell) {
                '#'
            } else {
                glyphs.get(&cell).copied().unwrap_or('.')
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
