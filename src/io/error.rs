//! Error types for board construction, search, and puzzle file handling

use std::fmt;
use std::path::PathBuf;

use crate::io::configuration::{MAX_BOARD_DIMENSION, MIN_BOARD_DIMENSION};
use crate::spatial::cell::Cell;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Board dimension outside the supported range
    OutOfRange {
        /// Name of the offending dimension
        dimension: &'static str,
        /// Provided value that failed validation
        value: usize,
    },

    /// Blocked cell outside the board bounds
    InvalidBlockedCell {
        /// The offending cell
        cell: Cell,
        /// Board width the cell was checked against
        width: usize,
        /// Board height the cell was checked against
        height: usize,
    },

    /// Piece constructed from an empty cell set
    EmptyShape,

    /// Piece entry rejected by input validation
    InvalidPiece {
        /// Explanation of why the entry is invalid
        reason: String,
    },

    /// Placement attempted where the shape does not fit
    ///
    /// The engine only places after a successful fit check, so observing
    /// this from the search indicates an engine bug, not a user-facing
    /// condition.
    Placement {
        /// Origin passed to the failing placement
        origin: Cell,
    },

    /// Removal of a shape that is not on the board at that position
    Removal {
        /// Origin passed to the failing removal
        origin: Cell,
    },

    /// A terminal or cancelled search was stepped again
    ExhaustedSearch,

    /// Puzzle file contents could not be interpreted
    PuzzleFormat {
        /// Description of what is wrong with the data
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { dimension, value } => {
                write!(
                    f,
                    "Board {dimension} {value} is outside the supported range \
                     [{MIN_BOARD_DIMENSION}, {MAX_BOARD_DIMENSION}]"
                )
            }
            Self::InvalidBlockedCell {
                cell,
                width,
                height,
            } => {
                write!(
                    f,
                    "Blocked cell {cell} is out of board bounds ({width}x{height})"
                )
            }
            Self::EmptyShape => {
                write!(f, "Piece shape must contain at least one cell")
            }
            Self::InvalidPiece { reason } => {
                write!(f, "Invalid piece: {reason}")
            }
            Self::Placement { origin } => {
                write!(f, "Cannot place shape at {origin}")
            }
            Self::Removal { origin } => {
                write!(f, "No matching placement to remove at {origin}")
            }
            Self::ExhaustedSearch => {
                write!(f, "Search already reached a terminal state")
            }
            Self::PuzzleFormat { reason } => {
                write!(f, "Invalid puzzle data: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for SolverError {
    fn from(err: serde_json::Error) -> Self {
        Self::PuzzleFormat {
            reason: err.to_string(),
        }
    }
}
