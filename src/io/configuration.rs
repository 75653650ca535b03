//! Solver constants and runtime configuration defaults

// Board size limits shared by construction-time validation
/// Minimum supported board dimension
pub const MIN_BOARD_DIMENSION: usize = 1;
/// Maximum supported board dimension
pub const MAX_BOARD_DIMENSION: usize = 50;

/// Default copy count for puzzle piece entries that omit one
pub const DEFAULT_PIECE_COUNT: usize = 1;

/// File extension recognised when scanning a directory for puzzles
pub const PUZZLE_EXTENSION: &str = "json";

// Progress display settings
/// Steps between progress spinner refreshes
pub const PROGRESS_UPDATE_INTERVAL: u64 = 1024;
