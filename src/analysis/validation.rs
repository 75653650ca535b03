//! Contiguity and area feasibility checks ahead of the search
//!
//! The engine treats any shape literally, including disconnected ones, so
//! contiguity enforcement lives here, on the path between puzzle input and
//! engine. Findings are human-readable and advisory: the search itself
//! still classifies infeasible inputs, these checks just catch them early.

use std::collections::{BTreeSet, VecDeque};

use crate::algorithm::multiset::PieceMultiset;
use crate::spatial::board::Board;
use crate::spatial::cell::Cell;

/// Whether the cells form a single 4-connected region
///
/// Runs a flood fill from an arbitrary cell over edge-adjacent neighbours.
/// An empty set is not connected.
pub fn is_connected(cells: &[Cell]) -> bool {
    let Some(&start) = cells.first() else {
        return false;
    };

    let all: BTreeSet<Cell> = cells.iter().copied().collect();
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(cell) = queue.pop_front() {
        for neighbour in cell.neighbours() {
            if all.contains(&neighbour) && seen.insert(neighbour) {
                queue.push_back(neighbour);
            }
        }
    }

    seen.len() == all.len()
}

/// Validate one piece's cell set, returning findings (empty when valid)
pub fn validate_piece_cells(cells: &[Cell]) -> Vec<String> {
    if cells.is_empty() {
        return vec!["piece has no cells".to_owned()];
    }

    let mut findings = Vec::new();
    if !is_connected(cells) {
        findings.push("piece cells are not edge-connected".to_owned());
    }
    findings
}

/// Check a board and piece multiset for solvability hazards
///
/// Reports disconnected pieces and area mismatches: a total piece area
/// exceeding the board can never fit, and one differing from the available
/// (non-blocked) area can never tile it exactly.
pub fn validate_puzzle(board: &Board, pieces: &PieceMultiset) -> Vec<String> {
    let mut findings = Vec::new();

    for piece in pieces.pieces() {
        findings.extend(validate_piece_cells(piece.canonical_shape().cells()));
    }

    let piece_area = pieces.total_area();
    let board_area = board.total_area();
    let available = board.available_area();

    if piece_area > board_area {
        findings.push(format!(
            "total piece area ({piece_area}) exceeds board area ({board_area})"
        ));
    } else if piece_area != available {
        findings.push(format!(
            "total piece area ({piece_area}) does not equal available board area ({available})"
        ));
    }

    findings
}
