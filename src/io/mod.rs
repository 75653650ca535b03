/// Command-line interface for solving puzzle definition files
pub mod cli;
/// Solver constants and runtime configuration defaults
pub mod configuration;
/// Error types for board construction, search, and puzzle file handling
pub mod error;
/// Progress display for long-running searches
pub mod progress;
/// JSON puzzle definitions
pub mod puzzle;
