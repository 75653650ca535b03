/// Backtracking placement search with externally paced stepping
pub mod engine;
/// Ordered piece multiset with deterministic iteration
pub mod multiset;

pub use engine::BacktrackingSearch;
pub use multiset::PieceMultiset;
