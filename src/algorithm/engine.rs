//! Backtracking placement search with externally paced stepping
//!
//! The search is an explicit state machine rather than a coroutine: each
//! [`BacktrackingSearch::step`] call performs exactly one board mutation
//! (or the terminal classification) and then returns a view of the live
//! engine state. The consumer controls pacing entirely; the engine does no
//! work between calls, and pacing cannot change the outcome because the
//! iteration order over cells, pieces, and orientations is fixed.

use crate::algorithm::multiset::PieceMultiset;
use crate::io::error::{Result, SolverError};
use crate::spatial::board::Board;
use crate::spatial::cell::Cell;
use crate::spatial::piece::Piece;
use crate::spatial::shape::Shape;

/// Classification of a single search step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// A piece orientation was placed on the board
    Place,
    /// The most recent placement was undone
    Remove,
    /// The search found an exact tiling; terminal
    Solved,
    /// The search space is exhausted with no tiling; terminal
    NoSolution,
}

/// Lifecycle state of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// The search can still be stepped
    Searching,
    /// Terminal: a tiling was found
    Solved,
    /// Terminal: the search space was exhausted
    Exhausted,
    /// Terminal: the consumer tore the search down
    Cancelled,
}

/// One shape instance currently on the board
///
/// The orientation is anchored so that its lexicographically smallest cell
/// sits at `origin + anchor`; `origin` is the exact translation passed to
/// `Board::place`, which makes the record sufficient to undo the placement.
#[derive(Debug, Clone)]
pub struct PlacementRecord {
    /// The exact orientation that was placed
    pub orientation: Shape,
    /// Translation applied to the orientation's cells
    pub origin: Cell,
    /// The piece type the orientation belongs to
    pub piece: Piece,
}

/// View of the engine state emitted by one step
///
/// The board, placement stack, and remaining counts are the engine's live
/// internal state, not copies. The borrow ends before the next `step`
/// call, which is what allows the engine to resume by mutating them
/// directly.
#[derive(Debug)]
pub struct SearchStep<'a> {
    /// What this step did
    pub kind: StepKind,
    /// Monotonically increasing step counter
    pub step_count: u64,
    /// Current board state
    pub board: &'a Board,
    /// Placements currently on the board, oldest first
    pub placements: &'a [PlacementRecord],
    /// Remaining piece counts
    pub remaining: &'a PieceMultiset,
}

/// Resume point for the enumeration at one target cell
#[derive(Debug, Clone, Copy)]
struct Frame {
    target: Cell,
    candidate: usize,
    orientation: usize,
}

impl Frame {
    const fn at(target: Cell) -> Self {
        Self {
            target,
            candidate: 0,
            orientation: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Locate the next empty cell and open a frame for it
    Descend,
    /// Continue the candidate enumeration at the top frame
    Resume,
}

/// Depth-first tiling search with chronological backtracking
///
/// Consumes a board and a piece multiset (working on its own copy of the
/// counts, never the caller's) and explores placements covering the first
/// empty cell in row-major order. Candidate pieces are tried in descending
/// area order with ties broken by canonical-shape order, and each
/// orientation is anchored so it covers the target cell, which bounds the
/// branching factor to placements that can cover the next hole.
#[derive(Debug)]
pub struct BacktrackingSearch {
    board: Board,
    remaining: PieceMultiset,
    candidates: Vec<Piece>,
    frames: Vec<Frame>,
    placements: Vec<PlacementRecord>,
    step_count: u64,
    state: SearchState,
    mode: Mode,
    started: bool,
}

impl BacktrackingSearch {
    /// Create a search over the given board and piece multiset
    ///
    /// The board is taken over for the duration of the search; the caller
    /// reads it back through [`Self::board`] or the emitted steps. The
    /// multiset is cloned, so the caller's copy is never mutated.
    pub fn new(board: Board, pieces: &PieceMultiset) -> Self {
        let mut candidates: Vec<Piece> = pieces.pieces().cloned().collect();
        candidates.sort_by(|a, b| {
            b.area()
                .cmp(&a.area())
                .then_with(|| a.canonical_shape().cmp(b.canonical_shape()))
        });

        Self {
            board,
            remaining: pieces.clone(),
            candidates,
            frames: Vec::new(),
            placements: Vec::new(),
            step_count: 0,
            state: SearchState::Searching,
            mode: Mode::Descend,
            started: false,
        }
    }

    /// Current board state
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Placements currently on the board, oldest first
    pub fn placements(&self) -> &[PlacementRecord] {
        &self.placements
    }

    /// Remaining piece counts
    pub const fn remaining(&self) -> &PieceMultiset {
        &self.remaining
    }

    /// Steps performed so far
    pub const fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SearchState {
        self.state
    }

    /// Whether the search can no longer be stepped
    pub fn is_terminal(&self) -> bool {
        self.state != SearchState::Searching
    }

    /// Tear the search down before it reaches a terminal state
    ///
    /// Subsequent `step` calls fail with `ExhaustedSearch`. Cancelling an
    /// already terminal search has no effect.
    pub fn cancel(&mut self) {
        if self.state == SearchState::Searching {
            self.state = SearchState::Cancelled;
        }
    }

    /// Advance the search by exactly one operation
    ///
    /// Performs one placement, one removal, or the terminal classification,
    /// then suspends. `Solved` and `NoSolution` are emitted exactly once,
    /// as the final step; step counters are strictly increasing across the
    /// full event sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ExhaustedSearch`] when called after a
    /// terminal step or after [`Self::cancel`]. `Placement` and `Removal`
    /// errors indicate a broken engine invariant and propagate instead of
    /// being swallowed.
    pub fn step(&mut self) -> Result<SearchStep<'_>> {
        if self.state != SearchState::Searching {
            return Err(SolverError::ExhaustedSearch);
        }

        if !self.started {
            self.started = true;
            // An empty multiset tiles the board vacuously.
            if self.remaining.is_empty() {
                self.state = SearchState::Solved;
                return Ok(self.emit(StepKind::Solved));
            }
        }

        loop {
            match self.mode {
                Mode::Descend => match self.board.first_empty() {
                    Some(target) => {
                        self.frames.push(Frame::at(target));
                        self.mode = Mode::Resume;
                    }
                    None => {
                        if self.remaining.is_empty() {
                            self.step_count += 1;
                            self.state = SearchState::Solved;
                            return Ok(self.emit(StepKind::Solved));
                        }
                        // Board covered but pieces remain: dead end.
                        let kind = self.unwind()?;
                        return Ok(self.emit(kind));
                    }
                },
                Mode::Resume => {
                    if self.try_placement()? {
                        return Ok(self.emit(StepKind::Place));
                    }
                    // No piece covers the frame's target cell.
                    self.frames.pop();
                    let kind = self.unwind()?;
                    return Ok(self.emit(kind));
                }
            }
        }
    }

    /// Try the next candidate placement at the top frame
    ///
    /// Scans candidates from the frame's resume point, skipping exhausted
    /// piece types. On success the frame records where it stopped so the
    /// next backtrack continues with the following orientation.
    fn try_placement(&mut self) -> Result<bool> {
        let Some(frame) = self.frames.last().copied() else {
            return Ok(false);
        };

        let mut candidate = frame.candidate;
        let mut orientation = frame.orientation;

        while let Some(piece) = self.candidates.get(candidate) {
            if self.remaining.count(piece) == 0 {
                candidate += 1;
                orientation = 0;
                continue;
            }

            while let Some(shape) = piece.orientations().get(orientation) {
                let Some(anchor) = shape.anchor() else {
                    orientation += 1;
                    continue;
                };
                // Anchor the orientation's smallest cell on the target so
                // every attempted placement covers the hole being filled.
                let origin = Cell::new(
                    frame.target.row - anchor.row,
                    frame.target.col - anchor.col,
                );

                if self.board.can_place(shape, origin) {
                    self.board.place(shape, origin)?;
                    self.placements.push(PlacementRecord {
                        orientation: shape.clone(),
                        origin,
                        piece: piece.clone(),
                    });
                    self.remaining.take_one(piece);

                    if let Some(top) = self.frames.last_mut() {
                        top.candidate = candidate;
                        top.orientation = orientation;
                    }
                    self.step_count += 1;
                    self.mode = Mode::Descend;
                    return Ok(true);
                }

                orientation += 1;
            }

            candidate += 1;
            orientation = 0;
        }

        Ok(false)
    }

    /// Undo the most recent placement, or classify the search as exhausted
    /// when nothing remains to undo
    fn unwind(&mut self) -> Result<StepKind> {
        self.step_count += 1;

        let Some(record) = self.placements.pop() else {
            self.state = SearchState::Exhausted;
            return Ok(StepKind::NoSolution);
        };

        self.board.remove(&record.orientation, record.origin)?;
        self.remaining.put_back(&record.piece);
        if let Some(top) = self.frames.last_mut() {
            top.orientation += 1;
        }
        self.mode = Mode::Resume;
        Ok(StepKind::Remove)
    }

    fn emit(&self, kind: StepKind) -> SearchStep<'_> {
        SearchStep {
            kind,
            step_count: self.step_count,
            board: &self.board,
            placements: &self.placements,
            remaining: &self.remaining,
        }
    }
}
