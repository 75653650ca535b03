//! Immutable puzzle pieces identified by their canonical shape

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::io::error::{Result, SolverError};
use crate::spatial::cell::Cell;
use crate::spatial::shape::{Shape, canonicalize};

/// A polyomino piece with its canonical shape and orientation set
///
/// Canonicalization runs once at construction: the piece stores the
/// lexicographically smallest orientation as its identity and the full set
/// of distinct orientations for placement search. Pieces related by
/// rotation or reflection are therefore the *same* piece: they compare
/// equal, hash identically, and collapse to one entry when used as map
/// keys. A piece is immutable after construction; editing a shape means
/// constructing a new piece.
#[derive(Debug, Clone)]
pub struct Piece {
    canonical: Shape,
    orientations: Vec<Shape>,
}

impl Piece {
    /// Construct a piece from a non-empty collection of cell offsets
    ///
    /// The offsets may be any orientation or translation of the intended
    /// shape; identity is derived from the canonical form. Connectivity is
    /// not checked here (see `analysis::validation`), so a disconnected
    /// cell set is canonicalized literally.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::EmptyShape`] if the collection contains no
    /// cells.
    pub fn new<I>(cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells: Vec<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(SolverError::EmptyShape);
        }

        let (canonical, orientations) = canonicalize(&cells);
        Ok(Self {
            canonical,
            orientations,
        })
    }

    /// The canonical shape used as this piece's identity
    pub const fn canonical_shape(&self) -> &Shape {
        &self.canonical
    }

    /// The distinct orientations of this piece, sorted
    ///
    /// The set size is always a divisor of eight, determined by the
    /// shape's symmetry group.
    pub fn orientations(&self) -> &[Shape] {
        &self.orientations
    }

    /// Number of cells covered by this piece
    pub fn area(&self) -> usize {
        self.canonical.area()
    }

    /// Width of the canonical shape's bounding box
    pub fn bounding_width(&self) -> usize {
        self.canonical.width()
    }

    /// Height of the canonical shape's bounding box
    pub fn bounding_height(&self) -> usize {
        self.canonical.height()
    }
}

// Identity is the canonical shape alone; orientations are derived from it
// and excluded from comparison and hashing.

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for Piece {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Piece {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}
