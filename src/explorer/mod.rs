//! Exploring the positions of an arena.
//!
//! - `available`: legal one-move extensions of a sequence
//! - `enumerate`: bounded breadth-first enumeration of reachable positions
//! - `explorer`: [`PositionExplorer`], step-by-step play with undo/redo
//! - `playout`: seeded random playouts
//! - `config`/`stats`: enumeration limits, cancellation and statistics

pub mod available;
pub mod config;
pub mod enumerate;
pub mod explorer;
pub mod playout;
pub mod stats;

pub use available::available_moves;
pub use config::{CancelToken, ExploreConfig};
pub use enumerate::{enumerate_positions, explore, explore_cached, successors, Exploration};
pub use explorer::PositionExplorer;
pub use playout::random_playout;
pub use stats::ExploreStats;
