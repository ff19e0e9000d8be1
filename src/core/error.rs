//! Engine error types.
//!
//! Only structural misuse is an error: bad arena bounds, an arena whose
//! move set breaks the tree invariant, an unavailable move, or malformed
//! input. Positions that break the legality rules are reported through
//! [`ValidityReport`](crate::rules::ValidityReport) instead.

use thiserror::Error;

use super::address::Address;
use super::player::Player;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced to callers of the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Arena generation was requested with unusable bounds.
    #[error("invalid arena configuration: {0}")]
    InvalidConfiguration(String),

    /// `make_move` was called with a move that is not currently available.
    #[error("illegal move {address}: not among the available moves")]
    IllegalMove {
        /// Address of the rejected move.
        address: Address,
    },

    /// A move set does not form a well-shaped arena.
    #[error("invalid arena: {0}")]
    InvalidArena(#[from] ArenaViolation),

    /// A position was paired with an arena it was not built from.
    #[error("position belongs to arena {found}, not {expected}")]
    ArenaMismatch {
        /// Id of the arena the caller supplied.
        expected: String,
        /// Id recorded in the position.
        found: String,
    },

    /// Textual input could not be parsed.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// The offending input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Binary encoding or decoding failed.
    #[error("arena encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

impl EngineError {
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// A breach of the arena tree invariant found while building an arena.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaViolation {
    /// Two moves share an address.
    #[error("address {0} appears more than once")]
    DuplicateAddress(Address),

    /// A non-initial move has no move at its parent address.
    #[error("move {0} has no parent move")]
    MissingParent(Address),

    /// The parent exists but does not open the branch leading to the move.
    #[error("move {address} is not declared by the ramification of {parent}")]
    UndeclaredBranch {
        /// The move that is not reachable.
        address: Address,
        /// Its parent address.
        parent: Address,
    },

    /// The move does not lie strictly below the arena base.
    #[error("move {address} lies outside arena base {base:?}")]
    OutsideBase {
        /// The misplaced move.
        address: Address,
        /// The arena base.
        base: String,
    },

    /// A move is owned by the wrong player for its depth.
    #[error("move {address} belongs to {expected} at its depth")]
    WrongOwner {
        /// The misowned move.
        address: Address,
        /// The owner its depth dictates.
        expected: Player,
    },

        /// A ramification lists index 0.
    #[error("move {0} opens branch 0; branch indices start at 1")]
    InvalidRamification(Address),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let addr: Address = "1.3".parse().unwrap();
        let err = EngineError::IllegalMove { address: addr.clone() };
        assert_eq!(err.to_string(), "illegal move 1.3: not among the available moves");

        let err = EngineError::from(ArenaViolation::MissingParent(addr));
        assert_eq!(err.to_string(), "invalid arena: move 1.3 has no parent move");
    }

    #[test]
    fn test_wrong_owner_message() {
        let err = ArenaViolation::WrongOwner {
            address: "1.1".parse().unwrap(),
            expected: Player::Opponent,
        };
        assert_eq!(err.to_string(), "move 1.1 belongs to O at its depth");
    }

    #[test]
    fn test_parse_helper() {
        let err = EngineError::parse("1.x", "segment is not a number");
        assert!(matches!(err, EngineError::Parse { ref input, .. } if input == "1.x"));
    }
}
