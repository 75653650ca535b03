//! Fixed-size puzzle board with blocked cells and tagged placements
//!
//! The board keeps a dense occupancy grid plus a bit mask of empty cells so
//! the search engine's first-empty scan is a single leading-bit query.
//! Every placement stamps its cells with a fresh tag, which makes two
//! placements of congruent shapes at different positions distinguishable
//! and lets removal verify it undoes exactly one earlier placement.

use std::collections::{BTreeSet, HashMap};

use bitvec::vec::BitVec;
use ndarray::Array2;

use crate::io::configuration::{MAX_BOARD_DIMENSION, MIN_BOARD_DIMENSION};
use crate::io::error::{Result, SolverError};
use crate::spatial::cell::Cell;
use crate::spatial::shape::Shape;

/// Opaque identifier for one placed shape instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementTag(u64);

/// Contents of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    /// Available for placement
    Empty,
    /// Permanently unavailable, fixed at construction
    Blocked,
    /// Covered by the placement carrying this tag
    Occupied(PlacementTag),
}

/// A rectangular grid of fixed dimensions with permanent blocked cells
///
/// Invariant: a blocked cell is never empty and never carries a placement
/// tag, and empty + blocked + occupied always partitions the full
/// `width * height` grid. Cloning a board produces an independent snapshot
/// with identical blocked cells and occupancy.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Array2<CellContent>,
    blocked: BTreeSet<Cell>,
    empty_mask: BitVec,
    active: HashMap<PlacementTag, (Shape, Cell)>,
    next_tag: u64,
}

impl Board {
    /// Create a board with the given dimensions and blocked cells
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::OutOfRange`] if either dimension lies outside
    /// the supported range, or [`SolverError::InvalidBlockedCell`] if a
    /// blocked cell falls outside the grid.
    pub fn new<I>(width: usize, height: usize, blocked_cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = Cell>,
    {
        for (dimension, value) in [("width", width), ("height", height)] {
            if !(MIN_BOARD_DIMENSION..=MAX_BOARD_DIMENSION).contains(&value) {
                return Err(SolverError::OutOfRange { dimension, value });
            }
        }

        let mut board = Self {
            width,
            height,
            cells: Array2::from_elem((height, width), CellContent::Empty),
            blocked: BTreeSet::new(),
            empty_mask: BitVec::repeat(true, width * height),
            active: HashMap::new(),
            next_tag: 0,
        };

        for cell in blocked_cells {
            let Some(index) = board.grid_index(cell) else {
                return Err(SolverError::InvalidBlockedCell {
                    cell,
                    width,
                    height,
                });
            };

            board.blocked.insert(cell);
            if let Some(slot) = board.cells.get_mut(index) {
                *slot = CellContent::Blocked;
            }
            board.empty_mask.set(index.0 * width + index.1, false);
        }

        Ok(board)
    }

    /// Board width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Board height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells, blocked or not
    pub const fn total_area(&self) -> usize {
        self.width * self.height
    }

    /// Number of cells available for placement (total minus blocked)
    pub fn available_area(&self) -> usize {
        self.total_area() - self.blocked.len()
    }

    /// Number of currently empty, non-blocked cells
    pub fn empty_area(&self) -> usize {
        self.empty_mask.count_ones()
    }

    /// Number of cells currently covered by placements
    pub fn filled_area(&self) -> usize {
        self.available_area() - self.empty_area()
    }

    /// Whether no empty, non-blocked cells remain
    pub fn is_full(&self) -> bool {
        self.empty_mask.not_any()
    }

    /// Whether no placements are currently on the board
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// The permanently blocked cells
    pub const fn blocked_cells(&self) -> &BTreeSet<Cell> {
        &self.blocked
    }

    /// Whether the given cell is blocked
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.blocked.contains(&cell)
    }

    /// Contents of the given cell, or `None` when out of bounds
    pub fn content_at(&self, cell: Cell) -> Option<CellContent> {
        let index = self.grid_index(cell)?;
        self.cells.get(index).copied()
    }

    /// Tag of the placement covering the given cell, if any
    pub fn placement_at(&self, cell: Cell) -> Option<PlacementTag> {
        match self.content_at(cell) {
            Some(CellContent::Occupied(tag)) => Some(tag),
            _ => None,
        }
    }

    /// All cells currently covered by placements
    pub fn occupied_cells(&self) -> BTreeSet<Cell> {
        self.collect_cells(|content| matches!(content, CellContent::Occupied(_)))
    }

    /// All currently empty, non-blocked cells
    pub fn empty_cells(&self) -> BTreeSet<Cell> {
        self.collect_cells(|content| matches!(content, CellContent::Empty))
    }

    /// First empty cell in row-major order, scanning rows top to bottom and
    /// columns left to right
    pub fn first_empty(&self) -> Option<Cell> {
        self.empty_mask
            .first_one()
            .map(|index| Cell::new((index / self.width) as i32, (index % self.width) as i32))
    }

    /// Whether the shape fits at `origin` without leaving the grid,
    /// touching a blocked cell, or overlapping a placement
    ///
    /// Pure query with no side effects. An empty shape trivially fits.
    pub fn can_place(&self, shape: &Shape, origin: Cell) -> bool {
        shape
            .cells_at(origin)
            .all(|cell| matches!(self.content_at(cell), Some(CellContent::Empty)))
    }

    /// Place the shape at `origin`, stamping its cells with a fresh tag
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Placement`] if [`Self::can_place`] would
    /// return false for the same arguments.
    pub fn place(&mut self, shape: &Shape, origin: Cell) -> Result<PlacementTag> {
        if !self.can_place(shape, origin) {
            return Err(SolverError::Placement { origin });
        }

        let tag = PlacementTag(self.next_tag);
        self.next_tag += 1;

        for cell in shape.cells_at(origin) {
            self.stamp(cell, CellContent::Occupied(tag), false);
        }
        self.active.insert(tag, (shape.clone(), origin));

        Ok(tag)
    }

    /// Remove the placement made by an earlier `place` call with the exact
    /// same shape and origin
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Removal`] unless every translated cell still
    /// carries the tag that the matching `place` call assigned.
    pub fn remove(&mut self, shape: &Shape, origin: Cell) -> Result<()> {
        let anchor = shape
            .cells_at(origin)
            .next()
            .ok_or(SolverError::Removal { origin })?;
        let Some(tag) = self.placement_at(anchor) else {
            return Err(SolverError::Removal { origin });
        };

        match self.active.get(&tag) {
            Some((placed_shape, placed_origin))
                if placed_shape == shape && *placed_origin == origin => {}
            _ => return Err(SolverError::Removal { origin }),
        }

        let expected = CellContent::Occupied(tag);
        if !shape
            .cells_at(origin)
            .all(|cell| self.content_at(cell) == Some(expected))
        {
            return Err(SolverError::Removal { origin });
        }

        for cell in shape.cells_at(origin) {
            self.stamp(cell, CellContent::Empty, true);
        }
        self.active.remove(&tag);

        Ok(())
    }

    /// Remove every placement, leaving blocked cells untouched
    pub fn clear(&mut self) {
        for (index, content) in self.cells.iter_mut().enumerate() {
            if matches!(content, CellContent::Occupied(_)) {
                *content = CellContent::Empty;
                self.empty_mask.set(index, true);
            }
        }
        self.active.clear();
    }

    fn grid_index(&self, cell: Cell) -> Option<(usize, usize)> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        (row < self.height && col < self.width).then_some((row, col))
    }

    fn stamp(&mut self, cell: Cell, content: CellContent, empty: bool) {
        if let Some(index) = self.grid_index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = content;
            }
            self.empty_mask.set(index.0 * self.width + index.1, empty);
        }
    }

    fn collect_cells<F>(&self, keep: F) -> BTreeSet<Cell>
    where
        F: Fn(CellContent) -> bool,
    {
        self.cells
            .indexed_iter()
            .filter(|&(_, &content)| keep(content))
            .map(|((row, col), _)| Cell::new(row as i32, col as i32))
            .collect()
    }
}

// Equality covers dimensions, blocked cells, and occupancy, so the
// place-then-remove round trip is observable as board equality. The tag
// counter is deliberately excluded.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.blocked == other.blocked
            && self.cells == other.cells
    }
}

impl Eq for Board {}
