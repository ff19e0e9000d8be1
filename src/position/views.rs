//! P-view and O-view extraction.
//!
//! The view of player `X` at a sequence `s` follows justification
//! pointers backwards from the last move:
//!
//! - `⌜ε⌝ = ε`
//! - `⌜s m⌝ = ⌜s⌝ m` when `m` is played by `X`
//! - `⌜s m⌝ = m` when `m` is an initial move of the other player
//! - `⌜s m' t m⌝ = ⌜s m'⌝ m` when `m` is a move of the other player
//!   justified by `m'`
//!
//! So a view is a thread through justifiers, not the set of `X`'s moves:
//! whatever happened between an opponent move and its justifier is hidden.

use serde::{Deserialize, Serialize};

use crate::core::{Move, Player};

/// Both views of a sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Views {
    /// What Proponent sees.
    pub p_view: Vec<Move>,
    /// What Opponent sees.
    pub o_view: Vec<Move>,
}

impl Views {
    /// The view of `player`.
    #[must_use]
    pub fn of(&self, player: Player) -> &[Move] {
        match player {
            Player::Proponent => &self.p_view,
            Player::Opponent => &self.o_view,
        }
    }

    /// Are both views empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.p_view.is_empty() && self.o_view.is_empty()
    }
}

/// Compute the P-view and O-view of `sequence`.
///
/// ```
/// use dialogue_games::core::{Move, Player};
/// use dialogue_games::position::compute_views;
///
/// let claim = Move::new("1".parse().unwrap(), [1, 2], Player::Proponent, true);
/// let why = Move::new("1.1".parse().unwrap(), [], Player::Opponent, false);
///
/// let views = compute_views(&[claim.clone(), why.clone()]);
/// assert_eq!(views.p_view, vec![claim.clone(), why.clone()]);
/// assert_eq!(views.o_view, vec![claim, why]);
/// ```
#[must_use]
pub fn compute_views(sequence: &[Move]) -> Views {
    Views {
        p_view: view_for(sequence, Player::Proponent),
        o_view: view_for(sequence, Player::Opponent),
    }
}

/// The view of `viewer`, as moves in play order.
#[must_use]
pub fn view_for(sequence: &[Move], viewer: Player) -> Vec<Move> {
    view_indices(sequence, viewer)
        .into_iter()
        .map(|i| sequence[i].clone())
        .collect()
}

/// The view of `viewer`, as ascending indices into `sequence`.
#[must_use]
pub fn view_indices(sequence: &[Move], viewer: Player) -> Vec<usize> {
    let mut view = Vec::new();
    let mut cursor = sequence.len().checked_sub(1);

    while let Some(i) = cursor {
        let mv = &sequence[i];
        view.push(i);

        cursor = if mv.player == viewer {
            i.checked_sub(1)
        } else if mv.is_initial {
            None
        } else {
            // An unjustified move ends the thread.
            justifier_index(sequence, i)
        };
    }

    view.reverse();
    view
}

/// Index of the justifier of `sequence[index]`.
///
/// The justifier is the most recent earlier move whose address is the
/// parent of the move's address and whose ramification opens its last
/// segment. Initial moves have none.
#[must_use]
pub fn justifier_index(sequence: &[Move], index: usize) -> Option<usize> {
    let mv = sequence.get(index)?;
    if mv.is_initial {
        return None;
    }
    sequence[..index].iter().rposition(|prev| prev.enables(mv))
}
