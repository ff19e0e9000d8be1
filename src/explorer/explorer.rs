//! Interactive position exploration with undo and redo.
//!
//! The explorer keeps no hidden cursor: the current position is the latest
//! value of a replay log, and its analysis (validity, views, available
//! moves) is looked up again after every change. Analyses go through a
//! bounded [`PositionCache`], so undo and redo revisit cached positions.

use im::Vector;
use log::trace;
use std::sync::Arc;

use crate::arena::Arena;
use crate::core::{Address, EngineError, Move, Player, PlayoutRng, Result};
use crate::position::{CacheStats, Position, PositionAnalysis, PositionCache, Views};
use crate::rules::ValidityReport;

use super::config::{CancelToken, ExploreConfig};
use super::enumerate::{explore_cached, Exploration};
use super::playout::random_playout;

/// Step-by-step explorer over one shared arena.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use dialogue_games::arena::{Arena, ArenaConfig};
/// use dialogue_games::explorer::PositionExplorer;
///
/// let arena = Arc::new(Arena::generate(&ArenaConfig::new(2, 2)).unwrap());
/// let mut explorer = PositionExplorer::new(arena);
///
/// explorer.make_move_at(&"1".parse().unwrap()).unwrap();
/// explorer.make_move_at(&"1.1".parse().unwrap()).unwrap();
/// assert_eq!(explorer.position().len(), 2);
///
/// explorer.undo();
/// assert_eq!(explorer.position().len(), 1);
/// explorer.redo();
/// assert_eq!(explorer.position().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct PositionExplorer {
    arena: Arc<Arena>,
    position: Position,
    current: Arc<PositionAnalysis>,
    redo_stack: Vec<Move>,
    cache: PositionCache,
}

impl PositionExplorer {
    /// Start at the empty position of `arena`.
    #[must_use]
    pub fn new(arena: Arc<Arena>) -> Self {
        let position = Position::new(&arena);
        Self::build(arena, position, PositionCache::default())
    }

    /// Start at the empty position, caching at most `capacity` analyses.
    #[must_use]
    pub fn with_cache_capacity(arena: Arc<Arena>, capacity: usize) -> Self {
        let position = Position::new(&arena);
        Self::build(arena, position, PositionCache::new(capacity))
    }

    /// Start at `position`, which must come from `arena`.
    pub fn with_position(arena: Arc<Arena>, position: Position) -> Result<Self> {
        if position.arena_id() != arena.id() {
            return Err(EngineError::ArenaMismatch {
                expected: arena.id().to_string(),
                found: position.arena_id().to_string(),
            });
        }
        Ok(Self::build(arena, position, PositionCache::default()))
    }

    fn build(arena: Arc<Arena>, position: Position, mut cache: PositionCache) -> Self {
        let current = cache.get_or_compute(&arena, &position);
        Self {
            arena,
            position,
            current,
            redo_stack: Vec::new(),
            cache,
        }
    }

    // === State ===

    /// The shared arena.
    #[must_use]
    pub fn arena(&self) -> &Arc<Arena> {
        &self.arena
    }

    /// The current position.
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Moves that legally extend the current position.
    #[must_use]
    pub fn available_moves(&self) -> &[Move] {
        &self.current.available
    }

    /// Whose turn is next.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.position.current_player()
    }

    /// No move is available.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal
    }

    /// Winner, once the current position is terminal.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        if self.is_terminal() {
            Some(self.current_player().other())
        } else {
            None
        }
    }

    /// Views of the current position.
    #[must_use]
    pub fn views(&self) -> Views {
        self.current.views.clone()
    }

    /// Legality report of the current position.
    #[must_use]
    pub fn validity(&self) -> ValidityReport {
        self.current.validity.clone()
    }

    /// Moves played so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<Move> {
        self.position.sequence()
    }

    /// Moves that `redo` would replay, most recent undo last.
    #[must_use]
    pub fn redo_moves(&self) -> &[Move] {
        &self.redo_stack
    }

    /// Counters of the analysis cache.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    // === Mutation ===

    /// Return to the empty position.
    pub fn reset(&mut self) {
        self.position = Position::new(&self.arena);
        self.redo_stack.clear();
        self.refresh();
    }

    /// Play `mv`, failing with `IllegalMove` unless it is available.
    pub fn make_move(&mut self, mv: &Move) -> Result<&Position> {
        if !self.current.available.contains(mv) {
            return Err(EngineError::IllegalMove {
                address: mv.address.clone(),
            });
        }
        self.redo_stack.clear();
        self.push(mv.clone());
        Ok(&self.position)
    }

    /// Play the available move at `address`.
    pub fn make_move_at(&mut self, address: &Address) -> Result<&Position> {
        let mv = self
            .current
            .available
            .iter()
            .find(|mv| mv.address == *address)
            .cloned()
            .ok_or_else(|| EngineError::IllegalMove {
                address: address.clone(),
            })?;
        self.redo_stack.clear();
        self.push(mv);
        Ok(&self.position)
    }

    /// Drop the last move. Returns it, or `None` at the empty position.
    pub fn undo(&mut self) -> Option<Move> {
        let last = self.position.last()?.clone();
        self.position = self.position.truncated(self.position.len() - 1);
        self.redo_stack.push(last.clone());
        self.refresh();
        trace!("undo {} -> {}", last.address, self.position);
        Some(last)
    }

    /// Replay the most recently undone move.
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.redo_stack.pop()?;
        if !self.current.available.contains(&mv) {
            // Undone moves always replay; anything else means the log is stale.
            self.redo_stack.clear();
            return None;
        }
        self.push(mv.clone());
        Some(mv)
    }

    // === Analysis ===

    /// Enumerate positions reachable from the current one, sharing the
    /// explorer's analysis cache.
    #[must_use]
    pub fn enumerate(&mut self, config: &ExploreConfig, cancel: &CancelToken) -> Exploration {
        explore_cached(&self.arena, &self.position, config, cancel, &mut self.cache)
    }

    /// Sample a random continuation of the current position.
    #[must_use]
    pub fn playout(&self, rng: &mut PlayoutRng, max_moves: usize) -> Position {
        random_playout(&self.arena, &self.position, rng, max_moves)
    }

    fn push(&mut self, mv: Move) {
        trace!("{} plays {}", mv.player, mv.address);
        self.position = self.position.extend(mv);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.current = self.cache.get_or_compute(&self.arena, &self.position);
    }
}
