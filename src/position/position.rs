//! Positions: played prefixes of a dialogue game.
//!
//! A position is a plain value. Extending it yields a new position; the
//! old one is untouched. The move sequence is an `im::Vector`, so a
//! position and its extensions share structure and clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::arena::{Arena, ArenaId};
use crate::core::{Address, Move, Player};
use crate::explorer::available_moves;
use crate::rules::{validate_position, ValidityReport};

use super::views::{compute_views, Views};

/// An ordered sequence of moves drawn from one arena.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    arena_id: ArenaId,
    opener: Player,
    sequence: Vector<Move>,
}

impl Position {
    /// The empty position of `arena`.
    #[must_use]
    pub fn new(arena: &Arena) -> Self {
        Self {
            arena_id: arena.id(),
            opener: arena.opener(),
            sequence: Vector::new(),
        }
    }

    /// A position holding `moves` in play order (not checked for legality).
    #[must_use]
    pub fn from_moves(arena: &Arena, moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            arena_id: arena.id(),
            opener: arena.opener(),
            sequence: moves.into_iter().collect(),
        }
    }

    /// The arena this position was built against.
    #[must_use]
    pub fn arena_id(&self) -> ArenaId {
        self.arena_id
    }

    /// The arena's opening player.
    #[must_use]
    pub fn opener(&self) -> Player {
        self.opener
    }

    /// The moves in play order.
    #[must_use]
    pub fn sequence(&self) -> &Vector<Move> {
        &self.sequence
    }

    /// Copy the moves into a contiguous vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Move> {
        self.sequence.iter().cloned().collect()
    }

    /// Number of moves played.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Is this the initial (empty) position?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Move at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Move> {
        self.sequence.get(index)
    }

    /// Last move played.
    #[must_use]
    pub fn last(&self) -> Option<&Move> {
        self.sequence.last()
    }

    /// Whose turn is next: the opener at the start, then alternating.
    #[must_use]
    pub fn current_player(&self) -> Player {
        match self.sequence.last() {
            Some(last) => last.player.other(),
            None => self.opener,
        }
    }

    /// Has a move at `address` been played?
    #[must_use]
    pub fn contains_address(&self, address: &Address) -> bool {
        self.sequence.iter().any(|mv| mv.address == *address)
    }

    /// This position followed by `mv`.
    #[must_use]
    pub fn extend(&self, mv: Move) -> Self {
        let mut sequence = self.sequence.clone();
        sequence.push_back(mv);
        Self {
            arena_id: self.arena_id,
            opener: self.opener,
            sequence,
        }
    }

    /// The prefix of the first `len` moves.
    #[must_use]
    pub fn truncated(&self, len: usize) -> Self {
        if len >= self.sequence.len() {
            return self.clone();
        }
        Self {
            arena_id: self.arena_id,
            opener: self.opener,
            sequence: self.sequence.take(len),
        }
    }

    /// Is `self` a prefix of `other`?
    #[must_use]
    pub fn is_prefix_of(&self, other: &Position) -> bool {
        self.arena_id == other.arena_id
            && self.len() <= other.len()
            && self.sequence.iter().zip(other.sequence.iter()).all(|(a, b)| a == b)
    }

    // === Derived ===

    /// P-view and O-view of this position.
    #[must_use]
    pub fn views(&self) -> Views {
        compute_views(&self.to_vec())
    }

    /// Legality report against `arena`.
    #[must_use]
    pub fn validity(&self, arena: &Arena) -> ValidityReport {
        validate_position(arena, &self.to_vec())
    }

    /// No move of `arena` legally continues this position.
    #[must_use]
    pub fn is_terminal(&self, arena: &Arena) -> bool {
        available_moves(arena, &self.to_vec()).is_empty()
    }

    /// Winner of a terminal position.
    ///
    /// The player to move is stuck and loses. Returns `None` while moves
    /// remain.
    #[must_use]
    pub fn winner(&self, arena: &Arena) -> Option<Player> {
        if self.is_terminal(arena) {
            Some(self.current_player().other())
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, mv) in self.sequence.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", mv.player, mv.address)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaConfig;

    fn arena() -> Arena {
        Arena::generate(&ArenaConfig::new(2, 2)).unwrap()
    }

    fn at(arena: &Arena, address: &str) -> Move {
        arena.move_at(&address.parse().unwrap()).unwrap().clone()
    }

    #[test]
    fn test_empty_position() {
        let arena = arena();
        let pos = Position::new(&arena);
        assert!(pos.is_empty());
        assert_eq!(pos.arena_id(), arena.id());
        assert_eq!(pos.current_player(), Player::Proponent);
        assert!(!pos.is_terminal(&arena));
        assert_eq!(pos.winner(&arena), None);
        assert!(pos.views().is_empty());
    }

    #[test]
    fn test_opponent_initial_turn() {
        let arena = Arena::generate(&ArenaConfig::new(2, 2).opponent_initial()).unwrap();
        assert_eq!(Position::new(&arena).current_player(), Player::Opponent);
    }

    #[test]
    fn test_extend_is_pure() {
        let arena = arena();
        let empty = Position::new(&arena);
        let one = empty.extend(at(&arena, "1"));
        let two = one.extend(at(&arena, "1.1"));

        assert_eq!(empty.len(), 0);
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert_eq!(one.current_player(), Player::Opponent);
        assert_eq!(two.current_player(), Player::Proponent);
        assert!(one.is_prefix_of(&two));
        assert!(!two.is_prefix_of(&one));
        assert_eq!(two.truncated(1), one);
        assert_eq!(two.truncated(5), two);
    }

    #[test]
    fn test_contains_and_display() {
        let arena = arena();
        let pos = Position::new(&arena)
            .extend(at(&arena, "1"))
            .extend(at(&arena, "1.2"));
        assert!(pos.contains_address(&"1.2".parse().unwrap()));
        assert!(!pos.contains_address(&"2".parse().unwrap()));
        assert_eq!(pos.to_string(), "[P:1 O:1.2]");
        assert_eq!(pos.last().unwrap().address.to_string(), "1.2");
    }

    #[test]
    fn test_winner_of_terminal_position() {
        let arena = arena();
        // After P:2, the justifier of 1.2 is outside O's view.
        let pos = Position::from_moves(
            &arena,
            ["1", "1.1", "2", "1.2"].iter().map(|a| at(&arena, a)),
        );
        assert!(!pos.validity(&arena).is_valid);

        let pos = Position::from_moves(&arena, ["1", "1.1", "2"].iter().map(|a| at(&arena, a)));
        assert!(pos.validity(&arena).is_valid);
        assert!(pos.is_terminal(&arena));
        assert_eq!(pos.winner(&arena), Some(Player::Proponent));
    }

    #[test]
    fn test_serialization() {
        let arena = arena();
        let pos = Position::new(&arena).extend(at(&arena, "1"));
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, back);
    }
}
