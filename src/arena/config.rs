//! Arena generation parameters.

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::core::{EngineError, Player, Ramification, Result};

use super::arena::ArenaId;

/// Largest arena the generator will build.
pub const MAX_ARENA_MOVES: usize = 100_000;

/// Deepest address the generator will build. Together with
/// [`MAX_ARENA_MOVES`] this bounds total address storage.
pub const MAX_ARENA_DEPTH: u32 = 64;

/// Arena generation parameters.
///
/// Generation is deterministic: the same config always yields the same
/// arena, so arenas can be cached by config (see [`ArenaConfig::id`]).
///
/// ## Branching rule
///
/// Every move above `max_depth` opens branches `1..=max_ramification`,
/// except that when `max_ramification >= 2` the last sibling
/// (`k == max_ramification`) is a closing move and opens nothing.
/// Moves at `max_depth` open nothing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Deepest address generated (relative to the base).
    pub max_depth: u32,

    /// Widest ramification a move may open.
    pub max_ramification: u32,

    /// Label of the root judgment (informational only).
    pub base_label: String,

    /// Player owning the initial moves.
    pub opener: Player,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_ramification: 3,
            base_label: String::new(),
            opener: Player::Proponent,
        }
    }
}

impl ArenaConfig {
    /// Create a config with the given bounds.
    #[must_use]
    pub fn new(max_depth: u32, max_ramification: u32) -> Self {
        Self {
            max_depth,
            max_ramification,
            ..Self::default()
        }
    }

    /// Set the root judgment label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.base_label = label.into();
        self
    }

    /// Let Opponent own the initial moves.
    #[must_use]
    pub fn opponent_initial(mut self) -> Self {
        self.opener = Player::Opponent;
        self
    }

    /// Set the opening player.
    #[must_use]
    pub fn with_opener(mut self, opener: Player) -> Self {
        self.opener = opener;
        self
    }

    /// Check bounds before any generation work is done.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth < 1 {
            return Err(EngineError::InvalidConfiguration(format!(
                "max_depth must be at least 1, got {}",
                self.max_depth
            )));
        }
        if self.max_ramification < 1 {
            return Err(EngineError::InvalidConfiguration(format!(
                "max_ramification must be at least 1, got {}",
                self.max_ramification
            )));
        }
        if self.max_depth > MAX_ARENA_DEPTH {
            return Err(EngineError::InvalidConfiguration(format!(
                "max_depth {} exceeds {}",
                self.max_depth, MAX_ARENA_DEPTH
            )));
        }
        match self.move_count() {
            Some(count) if count <= MAX_ARENA_MOVES => Ok(()),
            _ => Err(EngineError::InvalidConfiguration(format!(
                "depth {} with ramification {} exceeds {} moves",
                self.max_depth, self.max_ramification, MAX_ARENA_MOVES
            ))),
        }
    }

    /// Exact number of moves the branching rule generates.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn move_count(&self) -> Option<usize> {
        let width = self.max_ramification as usize;
        let open = self.open_branches() as usize;

        let mut total = 0usize;
        let mut level = width;
        for depth in 1..=self.max_depth {
            total = total.checked_add(level)?;
            if depth < self.max_depth {
                level = (level / width).checked_mul(open)?.checked_mul(width)?;
            }
        }
        Some(total)
    }

    /// Ramification of the generated move at `depth` with last segment `k`.
    #[must_use]
    pub fn ramification_at(&self, depth: u32, k: u32) -> Ramification {
        if depth >= self.max_depth || self.is_closing(k) {
            return Ramification::new();
        }
        (1..=self.max_ramification).collect()
    }

    /// Stable identity of the arena this config generates.
    #[must_use]
    pub fn id(&self) -> ArenaId {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        ArenaId(hasher.finish())
    }

    fn is_closing(&self, k: u32) -> bool {
        self.max_ramification >= 2 && k == self.max_ramification
    }

    fn open_branches(&self) -> u32 {
        if self.max_ramification >= 2 {
            self.max_ramification - 1
        } else {
            self.max_ramification
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArenaConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_ramification, 3);
        assert_eq!(config.opener, Player::Proponent);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ArenaConfig::new(4, 2)
            .with_label("climate policy")
            .opponent_initial();

        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_ramification, 2);
        assert_eq!(config.base_label, "climate policy");
        assert_eq!(config.opener, Player::Opponent);
    }

    #[test]
    fn test_rejects_zero_bounds() {
        assert!(matches!(
            ArenaConfig::new(0, 2).validate(),
            Err(EngineError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ArenaConfig::new(2, 0).validate(),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_oversized() {
        assert!(ArenaConfig::new(12, 9).validate().is_err());
        assert!(ArenaConfig::new(u32::MAX, u32::MAX).validate().is_err());
    }

    #[test]
    fn test_rejects_deep_chain() {
        // Few moves, but each address would be huge.
        let deep = ArenaConfig::new(100_000, 1);
        assert_eq!(deep.move_count(), Some(100_000));
        assert!(matches!(
            deep.validate(),
            Err(EngineError::InvalidConfiguration(ref msg)) if msg.contains("max_depth")
        ));

        assert!(ArenaConfig::new(MAX_ARENA_DEPTH, 1).validate().is_ok());
        assert!(ArenaConfig::new(MAX_ARENA_DEPTH + 1, 1).validate().is_err());
    }

    #[test]
    fn test_move_count() {
        // "1" opens {1,2}, "2" closes: 2 + 2 moves.
        assert_eq!(ArenaConfig::new(2, 2).move_count(), Some(4));
        // Chain of single branches.
        assert_eq!(ArenaConfig::new(5, 1).move_count(), Some(5));
        // 3 + 2*3 + 2*2*3
        assert_eq!(ArenaConfig::new(3, 3).move_count(), Some(21));
    }

    #[test]
    fn test_ramification_rule() {
        let config = ArenaConfig::new(2, 2);
        assert_eq!(config.ramification_at(1, 1).as_slice(), &[1, 2]);
        assert!(config.ramification_at(1, 2).is_empty());
        assert!(config.ramification_at(2, 1).is_empty());

        let chain = ArenaConfig::new(3, 1);
        assert_eq!(chain.ramification_at(1, 1).as_slice(), &[1]);
        assert!(chain.ramification_at(3, 1).is_empty());
    }

    #[test]
    fn test_id_is_stable() {
        let a = ArenaConfig::new(3, 2).with_label("x");
        let b = ArenaConfig::new(3, 2).with_label("x");
        let c = ArenaConfig::new(3, 2).with_label("y");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn test_serialization() {
        let config = ArenaConfig::new(2, 3).with_label("base");
        let json = serde_json::to_string(&config).unwrap();
        let back: ArenaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
