//! Tests for configuration constants and their relationships

#[cfg(test)]
mod tests {
    use polysolve::io::configuration::{
        DEFAULT_PIECE_COUNT, MAX_BOARD_DIMENSION, MIN_BOARD_DIMENSION, PROGRESS_UPDATE_INTERVAL,
        PUZZLE_EXTENSION,
    };

    #[test]
    fn test_board_dimension_limits_are_ordered() {
        assert!(MIN_BOARD_DIMENSION >= 1);
        assert!(MIN_BOARD_DIMENSION <= MAX_BOARD_DIMENSION);
    }

    #[test]
    fn test_default_piece_count_is_positive() {
        assert!(DEFAULT_PIECE_COUNT >= 1);
    }

    #[test]
    fn test_puzzle_extension_has_no_leading_dot() {
        assert!(!PUZZLE_EXTENSION.starts_with('.'));
        assert!(!PUZZLE_EXTENSION.is_empty());
    }

    #[test]
    fn test_progress_interval_is_nonzero() {
        // A zero interval would refresh the spinner on every step
        assert!(PROGRESS_UPDATE_INTERVAL > 0);
    }
}
