//! Arena moves.
//!
//! A move sits at an address, belongs to one player, and opens a set of
//! branches (its ramification) for the other player to continue from.
//! Move `(ξ, I)` justifies `(ξi, J)` exactly when `i ∈ I`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::address::Address;
use super::player::Player;

/// Ordered set of branch indices opened by a move.
pub type Ramification = SmallVec<[u32; 4]>;

/// An atomic, addressed move of a dialogue game.
///
/// A move's identity within an arena is its address.
///
/// ## Example
///
/// ```
/// use dialogue_games::core::{Address, Move, Player};
///
/// let why: Move = Move::new("1".parse().unwrap(), [1, 2], Player::Proponent, true);
/// let grounds = Move::new("1.2".parse().unwrap(), [], Player::Opponent, false);
///
/// assert!(why.enables(&grounds));
/// assert_eq!(why.child_addresses().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Position of the move in the arena tree.
    pub address: Address,

    /// Branches opened for the continuation, sorted and distinct.
    pub ramification: Ramification,

    /// Owner of the move.
    pub player: Player,

    /// Direct child of the arena base; needs no justifier.
    pub is_initial: bool,
}

impl Move {
    /// Create a move. The ramification is sorted and deduplicated; branch
    /// index 0 does not exist and is dropped.
    #[must_use]
    pub fn new(
        address: Address,
        ramification: impl IntoIterator<Item = u32>,
        player: Player,
        is_initial: bool,
    ) -> Self {
        let mut ramification: Ramification =
            ramification.into_iter().filter(|&i| i != 0).collect();
        ramification.sort_unstable();
        ramification.dedup();

        Self {
            address,
            ramification,
            player,
            is_initial,
        }
    }

    /// Depth of the move's address (from the absolute root).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.address.depth()
    }

    /// Does this move open branch `index`?
    #[must_use]
    pub fn opens(&self, index: u32) -> bool {
        self.ramification.binary_search(&index).is_ok()
    }

    /// Does this move justify `other`?
    #[must_use]
    pub fn enables(&self, other: &Move) -> bool {
        self.enables_address(&other.address)
    }

    /// Does this move justify a move at `address`?
    #[must_use]
    pub fn enables_address(&self, address: &Address) -> bool {
        address.is_child_of(&self.address)
            && address.last_segment().is_some_and(|i| self.opens(i))
    }

    /// Addresses this move makes reachable, in branch order.
    #[must_use]
    pub fn child_addresses(&self) -> Vec<Address> {
        self.ramification
            .iter()
            .filter(|&&i| i != 0)
            .map(|&i| self.address.child(i))
            .collect()
    }

    /// Does this move close its branch (open nothing)?
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.ramification.is_empty()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}{{", self.player, self.address)?;
        for (i, index) in self.ramification.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", index)?;
        }
        f.write_str("}")
    }
}
