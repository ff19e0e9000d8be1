//! Random playouts: sample one complete dialogue from a position.

use log::trace;

use crate::arena::Arena;
use crate::core::PlayoutRng;
use crate::position::Position;

use super::available::available_moves;

/// Play uniformly random available moves from `start`.
///
/// Stops at a terminal position or after `max_moves` additional moves.
/// The same seed always replays the same dialogue.
///
/// ```
/// use dialogue_games::arena::{Arena, ArenaConfig};
/// use dialogue_games::core::PlayoutRng;
/// use dialogue_games::explorer::random_playout;
/// use dialogue_games::position::Position;
///
/// let arena = Arena::generate(&ArenaConfig::new(3, 2)).unwrap();
/// let start = Position::new(&arena);
///
/// let a = random_playout(&arena, &start, &mut PlayoutRng::new(1), 100);
/// let b = random_playout(&arena, &start, &mut PlayoutRng::new(1), 100);
/// assert_eq!(a, b);
/// assert!(a.is_terminal(&arena));
/// ```
#[must_use]
pub fn random_playout(
    arena: &Arena,
    start: &Position,
    rng: &mut PlayoutRng,
    max_moves: usize,
) -> Position {
    let mut position = start.clone();

    for _ in 0..max_moves {
        let sequence = position.to_vec();
        let available = available_moves(arena, &sequence);
        let Some(&chosen) = rng.choose(&available) else {
            break;
        };

        trace!("playout: {} plays {}", chosen.player, chosen.address);
        position = position.extend(chosen.clone());
    }

    position
}
