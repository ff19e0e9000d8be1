//! Positions and their views.
//!
//! - [`Position`]: an immutable played prefix of a game
//! - [`compute_views`]: justifier-threaded P-view and O-view
//! - [`PositionCache`]: bounded LRU cache of per-position analyses

pub mod cache;
pub mod position;
pub mod views;

pub use cache::{CacheStats, PositionAnalysis, PositionCache, DEFAULT_CACHE_CAPACITY};
pub use position::Position;
pub use views::{compute_views, justifier_index, view_for, view_indices, Views};
