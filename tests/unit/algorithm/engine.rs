//! Tests for the stepped backtracking search and its event protocol

#[cfg(test)]
mod tests {
    use polysolve::SolverError;
    use polysolve::algorithm::engine::{BacktrackingSearch, SearchState, StepKind};
    use polysolve::algorithm::multiset::PieceMultiset;
    use polysolve::spatial::board::Board;
    use polysolve::spatial::cell::Cell;
    use polysolve::spatial::piece::Piece;

    fn piece(raw: &[(i32, i32)]) -> Piece {
        match Piece::new(raw.iter().map(|&(row, col)| Cell::new(row, col))) {
            Ok(piece) => piece,
            Err(error) => unreachable!("piece construction failed: {error}"),
        }
    }

    fn board(width: usize, height: usize, blocked: &[(i32, i32)]) -> Board {
        let cells = blocked.iter().map(|&(row, col)| Cell::new(row, col));
        match Board::new(width, height, cells) {
            Ok(board) => board,
            Err(error) => unreachable!("board construction failed: {error}"),
        }
    }

    fn multiset(entries: &[(&[(i32, i32)], usize)]) -> PieceMultiset {
        let mut pieces = PieceMultiset::new();
        for &(raw, count) in entries {
            pieces.add(piece(raw), count);
        }
        pieces
    }

    /// Drive the search to its terminal event, collecting every step
    fn drive(search: &mut BacktrackingSearch) -> Vec<(StepKind, u64)> {
        let mut events = Vec::new();
        for _ in 0..100_000 {
            let (kind, count) = match search.step() {
                Ok(step) => (step.kind, step.step_count),
                Err(error) => unreachable!("search failed: {error}"),
            };
            events.push((kind, count));
            if matches!(kind, StepKind::Solved | StepKind::NoSolution) {
                return events;
            }
        }
        unreachable!("search did not terminate within the step cap");
    }

    fn assert_strictly_increasing(events: &[(StepKind, u64)]) {
        for pair in events.windows(2) {
            match pair {
                [(_, a), (_, b)] => assert!(a < b, "step counts must strictly increase"),
                _ => unreachable!("windows(2) yields pairs"),
            }
        }
    }

    #[test]
    fn test_empty_multiset_is_vacuously_solved() {
        let mut search = BacktrackingSearch::new(board(2, 2, &[]), &PieceMultiset::new());

        let events = drive(&mut search);
        assert_eq!(events, vec![(StepKind::Solved, 0)]);
        assert!(search.is_terminal());
        assert_eq!(search.state(), SearchState::Solved);
    }

    #[test]
    fn test_two_dominoes_tile_a_2x2_board() {
        let pieces = multiset(&[(&[(0, 0), (0, 1)], 2)]);
        let mut search = BacktrackingSearch::new(board(2, 2, &[]), &pieces);

        let events = drive(&mut search);

        match events.last() {
            Some((StepKind::Solved, _)) => {}
            other => unreachable!("expected solved, got {other:?}"),
        }
        assert!(search.board().is_full());
        assert_eq!(search.placements().len(), 2);
        assert!(search.remaining().is_empty());
        assert_strictly_increasing(&events);
    }

    #[test]
    fn test_straight_trominoes_cannot_tile_a_2x2_board() {
        let pieces = multiset(&[(&[(0, 0), (0, 1), (0, 2)], 2)]);
        let mut search = BacktrackingSearch::new(board(2, 2, &[]), &pieces);

        let events = drive(&mut search);

        match events.last() {
            Some((StepKind::NoSolution, _)) => {}
            other => unreachable!("expected no solution, got {other:?}"),
        }
        assert!(search.board().is_empty());
        assert_eq!(search.state(), SearchState::Exhausted);
    }

    #[test]
    fn test_blocked_cell_makes_dominoes_unsolvable() {
        let pieces = multiset(&[(&[(0, 0), (0, 1)], 2)]);
        let mut search = BacktrackingSearch::new(board(2, 2, &[(0, 1)]), &pieces);

        let events = drive(&mut search);

        match events.last() {
            Some((StepKind::NoSolution, _)) => {}
            other => unreachable!("expected no solution, got {other:?}"),
        }
        assert_strictly_increasing(&events);
    }

    #[test]
    fn test_single_monomino_fills_a_1x1_board() {
        let pieces = multiset(&[(&[(0, 0)], 1)]);
        let mut search = BacktrackingSearch::new(board(1, 1, &[]), &pieces);

        let events = drive(&mut search);
        let kinds: Vec<StepKind> = events.iter().map(|&(kind, _)| kind).collect();

        assert_eq!(kinds, vec![StepKind::Place, StepKind::Solved]);
    }

    #[test]
    fn test_monominoes_fill_without_backtracking() {
        let pieces = multiset(&[(&[(0, 0)], 4)]);
        let mut search = BacktrackingSearch::new(board(2, 2, &[]), &pieces);

        let events = drive(&mut search);
        let kinds: Vec<StepKind> = events.iter().map(|&(kind, _)| kind).collect();

        assert_eq!(
            kinds,
            vec![
                StepKind::Place,
                StepKind::Place,
                StepKind::Place,
                StepKind::Place,
                StepKind::Solved,
            ]
        );
        assert_strictly_increasing(&events);
    }

    #[test]
    fn test_terminal_event_occurs_exactly_once_and_last() {
        let pieces = multiset(&[(&[(0, 0), (0, 1)], 3)]);
        let mut search = BacktrackingSearch::new(board(3, 2, &[]), &pieces);

        let events = drive(&mut search);
        let terminal_count = events
            .iter()
            .filter(|(kind, _)| matches!(kind, StepKind::Solved | StepKind::NoSolution))
            .count();

        assert_eq!(terminal_count, 1);
        assert!(matches!(
            events.last(),
            Some((StepKind::Solved | StepKind::NoSolution, _))
        ));
    }

    #[test]
    fn test_pieces_are_conserved_at_every_step() {
        let pieces = multiset(&[(&[(0, 0), (0, 1)], 6)]);
        let mut search = BacktrackingSearch::new(board(4, 3, &[]), &pieces);

        for _ in 0..100_000 {
            let done = {
                let step = match search.step() {
                    Ok(step) => step,
                    Err(error) => unreachable!("search failed: {error}"),
                };
                assert_eq!(step.placements.len() + step.remaining.total_pieces(), 6);
                matches!(step.kind, StepKind::Solved | StepKind::NoSolution)
            };
            if done {
                return;
            }
        }
        unreachable!("search did not terminate within the step cap");
    }

    #[test]
    fn test_larger_pieces_are_tried_first() {
        let pieces = multiset(&[
            (&[(0, 0)], 4),
            (&[(0, 0), (0, 1), (1, 0), (1, 1)], 1),
        ]);
        let mut search = BacktrackingSearch::new(board(2, 2, &[]), &pieces);

        let first = match search.step() {
            Ok(step) => step,
            Err(error) => unreachable!("search failed: {error}"),
        };

        assert_eq!(first.kind, StepKind::Place);
        match first.placements.last() {
            Some(record) => assert_eq!(record.piece.area(), 4),
            None => unreachable!("a place step must push a record"),
        }
    }

    #[test]
    fn test_stepping_after_terminal_fails_loudly() {
        let pieces = multiset(&[(&[(0, 0)], 1)]);
        let mut search = BacktrackingSearch::new(board(1, 1, &[]), &pieces);

        drive(&mut search);
        match search.step() {
            Err(SolverError::ExhaustedSearch) => {}
            Ok(_) => unreachable!("terminal search must not be steppable"),
            Err(error) => unreachable!("unexpected error: {error}"),
        }
    }

    #[test]
    fn test_cancelled_search_cannot_be_resumed() {
        let pieces = multiset(&[(&[(0, 0), (1, 0), (0, 1)], 8)]);
        let mut search = BacktrackingSearch::new(board(5, 5, &[]), &pieces);

        for _ in 0..5 {
            assert!(search.step().is_ok());
        }
        search.cancel();

        assert_eq!(search.state(), SearchState::Cancelled);
        assert!(search.is_terminal());
        assert!(matches!(search.step(), Err(SolverError::ExhaustedSearch)));
    }

    #[test]
    fn test_cancel_after_terminal_keeps_the_outcome() {
        let pieces = multiset(&[(&[(0, 0)], 1)]);
        let mut search = BacktrackingSearch::new(board(1, 1, &[]), &pieces);

        drive(&mut search);
        search.cancel();

        assert_eq!(search.state(), SearchState::Solved);
    }

    #[test]
    fn test_search_is_deterministic() {
        let pieces = multiset(&[(&[(0, 0), (0, 1)], 2), (&[(0, 0), (1, 0), (0, 1)], 1)]);

        let mut first = BacktrackingSearch::new(board(2, 2, &[]), &pieces);
        let mut second = BacktrackingSearch::new(board(2, 2, &[]), &pieces);

        assert_eq!(drive(&mut first), drive(&mut second));
    }

    #[test]
    fn test_caller_multiset_is_never_mutated() {
        let pieces = multiset(&[(&[(0, 0), (0, 1)], 2)]);
        let mut search = BacktrackingSearch::new(board(2, 2, &[]), &pieces);

        drive(&mut search);

        assert_eq!(pieces.total_pieces(), 2);
        assert!(search.remaining().is_empty());
    }

    #[test]
    fn test_remove_events_appear_when_backtracking_is_needed() {
        // L-trominoes cannot tile the 3x3 square, but placements do
        // succeed along the way, so every one of them must be retracted
        let pieces = multiset(&[(&[(0, 0), (1, 0), (0, 1)], 3)]);
        let mut search = BacktrackingSearch::new(board(3, 3, &[]), &pieces);

        let events = drive(&mut search);
        let kinds: Vec<StepKind> = events.iter().map(|&(kind, _)| kind).collect();

        assert!(matches!(kinds.last(), Some(StepKind::NoSolution)));
        assert!(kinds.contains(&StepKind::Place));
        assert!(kinds.contains(&StepKind::Remove));
        assert!(search.board().is_empty());
        assert_eq!(search.remaining().total_pieces(), 3);
    }
}
