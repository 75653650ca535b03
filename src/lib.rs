//! Exhaustive polyomino tiling search with steppable backtracking
//!
//! The crate canonicalizes polyomino pieces under the eight symmetries of
//! the square, places them on a rectangular board with optional blocked
//! cells, and searches for an exact tiling (every non-blocked cell covered
//! exactly once) by depth-first backtracking. The search advances one
//! placement or removal per step, entirely at the consumer's pace, which
//! makes the event stream directly usable for step-by-step visualization.

#![forbid(unsafe_code)]

/// Backtracking search engine and piece multiset bookkeeping
pub mod algorithm;
/// Input validation and feasibility analysis ahead of the search
pub mod analysis;
/// Errors, configuration, puzzle files, and the CLI driver
pub mod io;
/// Cells, shapes, pieces, and the puzzle board
pub mod spatial;

pub use io::error::{Result, SolverError};
