//! JSON puzzle definitions
//!
//! A puzzle file is the serialized form of the solver's two inputs: a board
//! descriptor and a piece multiset. The schema stays backward compatible
//! with hand-edited files: `blocked_cells` defaults to empty and a piece
//! entry's `count` defaults to one. Timestamps are carried through verbatim
//! when present; the solver never interprets them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::multiset::PieceMultiset;
use crate::analysis::validation::validate_piece_cells;
use crate::io::configuration::DEFAULT_PIECE_COUNT;
use crate::io::error::{Result, SolverError};
use crate::spatial::board::Board;
use crate::spatial::cell::Cell;
use crate::spatial::piece::Piece;

const fn default_piece_count() -> usize {
    DEFAULT_PIECE_COUNT
}

/// One piece entry in a puzzle definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceEntry {
    /// Shape cells as `[row, col]` offsets
    pub shape: Vec<[i32; 2]>,
    /// Number of copies of this piece
    #[serde(default = "default_piece_count")]
    pub count: usize,
}

/// A complete puzzle definition as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    /// User-chosen puzzle name
    pub name: String,
    /// Board width in cells
    pub board_width: usize,
    /// Board height in cells
    pub board_height: usize,
    /// Initially blocked cell positions as `[row, col]` pairs
    #[serde(default)]
    pub blocked_cells: Vec<[i32; 2]>,
    /// Piece entries with copy counts
    pub pieces: Vec<PieceEntry>,
    /// Creation timestamp, carried through unmodified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last-modification timestamp, carried through unmodified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

impl PuzzleDefinition {
    /// Load a puzzle definition from a JSON file
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::FileSystem`] if the file cannot be read, or
    /// [`SolverError::PuzzleFormat`] if its contents are not a valid
    /// puzzle definition.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SolverError::FileSystem {
            path: path.to_path_buf(),
            operation: "read",
            source,
        })?;

        let definition: Self = serde_json::from_str(&text)?;
        Ok(definition)
    }

    /// Save this puzzle definition as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::FileSystem`] if the file cannot be written,
    /// or [`SolverError::PuzzleFormat`] if serialization fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| SolverError::FileSystem {
            path: path.to_path_buf(),
            operation: "write",
            source,
        })
    }

    /// Build the board described by this definition
    ///
    /// # Errors
    ///
    /// Propagates the board constructor's validation errors for
    /// out-of-range dimensions or out-of-bounds blocked cells.
    pub fn board(&self) -> Result<Board> {
        Board::new(
            self.board_width,
            self.board_height,
            self.blocked_cells
                .iter()
                .map(|&[row, col]| Cell::new(row, col)),
        )
    }

    /// Build the piece multiset described by this definition
    ///
    /// Congruent entries fold into one multiset entry, so a file listing a
    /// shape and its rotation separately still produces a single piece
    /// type with the combined count.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidPiece`] for a non-positive count or a
    /// shape that is empty or not edge-connected.
    pub fn piece_multiset(&self) -> Result<PieceMultiset> {
        let mut pieces = PieceMultiset::new();

        for entry in &self.pieces {
            if entry.count == 0 {
                return Err(SolverError::InvalidPiece {
                    reason: "piece count must be positive".to_owned(),
                });
            }

            let cells: Vec<Cell> = entry
                .shape
                .iter()
                .map(|&[row, col]| Cell::new(row, col))
                .collect();

            if let Some(finding) = validate_piece_cells(&cells).into_iter().next() {
                return Err(SolverError::InvalidPiece { reason: finding });
            }

            pieces.add(Piece::new(cells)?, entry.count);
        }

        Ok(pieces)
    }

    /// Reconstruct a definition from live board and multiset state
    ///
    /// Piece entries are emitted in the multiset's canonical order, so
    /// saving the same puzzle twice produces identical files.
    pub fn from_parts(name: &str, board: &Board, pieces: &PieceMultiset) -> Self {
        Self {
            name: name.to_owned(),
            board_width: board.width(),
            board_height: board.height(),
            blocked_cells: board
                .blocked_cells()
                .iter()
                .map(|cell| [cell.row, cell.col])
                .collect(),
            pieces: pieces
                .iter()
                .map(|(piece, count)| PieceEntry {
                    shape: piece
                        .canonical_shape()
                        .cells()
                        .iter()
                        .map(|cell| [cell.row, cell.col])
                        .collect(),
                    count,
                })
                .collect(),
            created_at: None,
            modified_at: None,
        }
    }
}
