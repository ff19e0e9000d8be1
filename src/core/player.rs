//! The two players of a dialogue game.
//!
//! ## Player
//!
//! Proponent (`P`) defends the root judgment, Opponent (`O`) challenges it.
//! Ownership of arena moves alternates by depth, starting from the arena's
//! opening player.

use serde::{Deserialize, Serialize};

/// One of the two players of a dialogue game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// Proponent (`P`).
    #[default]
    Proponent,
    /// Opponent (`O`).
    Opponent,
}

impl Player {
    /// Both players, Proponent first.
    pub const ALL: [Player; 2] = [Player::Proponent, Player::Opponent];

    /// The other player.
    ///
    /// ```
    /// use dialogue_games::core::Player;
    ///
    /// assert_eq!(Player::Proponent.other(), Player::Opponent);
    /// assert_eq!(Player::Opponent.other(), Player::Proponent);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Player::Proponent => Player::Opponent,
            Player::Opponent => Player::Proponent,
        }
    }

    /// Owner of a move at `depth` below the arena base when `self` opens.
    ///
    /// Odd depths belong to the opener, even depths to the other player.
    #[must_use]
    pub const fn at_depth(self, depth: usize) -> Self {
        if depth % 2 == 1 {
            self
        } else {
            self.other()
        }
    }

    /// Single-letter symbol (`P` or `O`).
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Player::Proponent => 'P',
            Player::Opponent => 'O',
        }
    }

    /// Parse a single-letter symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "P" => Some(Player::Proponent),
            "O" => Some(Player::Opponent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_is_involution() {
        for player in Player::ALL {
            assert_ne!(player.other(), player);
            assert_eq!(player.other().other(), player);
        }
    }

    #[test]
    fn test_at_depth_alternates() {
        let p = Player::Proponent;
        assert_eq!(p.at_depth(1), Player::Proponent);
        assert_eq!(p.at_depth(2), Player::Opponent);
        assert_eq!(p.at_depth(3), Player::Proponent);

        let o = Player::Opponent;
        assert_eq!(o.at_depth(1), Player::Opponent);
        assert_eq!(o.at_depth(2), Player::Proponent);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(format!("{}", Player::Proponent), "P");
        assert_eq!(format!("{}", Player::Opponent), "O");
        assert_eq!(Player::from_symbol("O"), Some(Player::Opponent));
        assert_eq!(Player::from_symbol("X"), None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Player::Opponent).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Player::Opponent);
    }
}
