//! Puzzle feasibility analysis ahead of the search

/// Contiguity and area feasibility checks
pub mod validation;
