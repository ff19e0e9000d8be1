//! # dialogue-games
//!
//! A ludics-style dialogue game engine over universal arenas.
//!
//! ## Design Principles
//!
//! 1. **Arenas are generated, not edited**: an [`Arena`] is built once from
//!    bounded parameters (or checked from an explicit move set) and is
//!    immutable afterwards. Share it behind an `Arc`.
//!
//! 2. **Positions are values**: extending a [`Position`] returns a new one.
//!    Sequences are persistent `im` vectors, so prefixes share structure.
//!
//! 3. **Illegality is data, not failure**: [`validate_position`] always
//!    returns a [`ValidityReport`]. Errors are reserved for structural
//!    misuse (bad bounds, an unavailable move, malformed input).
//!
//! ## Architecture
//!
//! - **Addresses**: moves live at dotted addresses `ξ = i1.i2...`; a move
//!   `(ξ, I)` justifies `(ξi, J)` exactly when `i ∈ I`.
//!
//! - **Views**: the P-view and O-view are justifier-threaded subsequences.
//!   A move must be justified inside its mover's own view.
//!
//! - **Bounded enumeration**: breadth-first, chunked, cancellable and
//!   capped. The optional `parallel` feature fans chunks out over `rayon`.
//!
//! ## Modules
//!
//! - `core`: addresses, players, moves, errors, RNG
//! - `arena`: arena generation, queries and encoding
//! - `position`: positions and their views
//! - `rules`: the legality validator
//! - `explorer`: available moves, enumeration, interactive exploration

pub mod arena;
pub mod core;
pub mod explorer;
pub mod position;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Address, ArenaViolation, EngineError, Move, Player, PlayoutRng, PlayoutRngState, Ramification,
    Result,
};

pub use crate::arena::{
    Arena, ArenaConfig, ArenaId, ArenaStats, EncodedArena, MAX_ARENA_DEPTH, MAX_ARENA_MOVES,
};

pub use crate::position::{
    compute_views, view_for, CacheStats, Position, PositionAnalysis, PositionCache, Views,
};

pub use crate::rules::{validate_position, ValidityReport, Violation, ViolationKind};

pub use crate::explorer::{
    explore, explore_cached, random_playout, successors, CancelToken, ExploreConfig, ExploreStats,
    Exploration, PositionExplorer,
};

/// Generate the universal arena for `config`.
///
/// Same config, same arena: move sets and ids are reproducible.
pub fn generate_arena(config: &ArenaConfig) -> Result<Arena> {
    Arena::generate(config)
}

/// Owned list of the moves that legally extend `sequence`.
///
/// See [`explorer::available_moves`] for the borrowing form.
#[must_use]
pub fn available_moves(arena: &Arena, sequence: &[Move]) -> Vec<Move> {
    explorer::available_moves(arena, sequence)
        .into_iter()
        .cloned()
        .collect()
}

/// Positions reachable from `start` in at most `max_depth` further moves,
/// capped at `max_count` positions (start included).
///
/// ```
/// use dialogue_games::{enumerate_positions, generate_arena, ArenaConfig};
///
/// let arena = generate_arena(&ArenaConfig::new(2, 2)).unwrap();
/// assert_eq!(enumerate_positions(&arena, &[], None, 100).len(), 7);
/// assert_eq!(enumerate_positions(&arena, &[], Some(1), 100).len(), 3);
/// assert_eq!(enumerate_positions(&arena, &[], None, 4).len(), 4);
/// ```
#[must_use]
pub fn enumerate_positions(
    arena: &Arena,
    start: &[Move],
    max_depth: Option<usize>,
    max_count: usize,
) -> Vec<Position> {
    let start = Position::from_moves(arena, start.iter().cloned());
    let mut config = ExploreConfig::default().with_max_positions(max_count);
    config.max_depth = max_depth;
    explorer::enumerate_positions(arena, &start, &config)
}
