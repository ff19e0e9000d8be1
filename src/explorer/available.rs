//! Available-move computation.
//!
//! A move is available at a legal position when appending it keeps the
//! position legal. Rather than re-validating every candidate, the arena is
//! filtered in four passes mirroring the legality rules: turn (parity),
//! unplayed address (linearity), played justifier (justification), and
//! justifier inside the mover's view (visibility).

use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::arena::Arena;
use crate::core::{Address, Move};
use crate::position::views::view_indices;
use crate::rules::validate_position;

/// Moves of `arena` that legally extend `sequence`, in arena order.
///
/// An illegal `sequence` has no legal extensions.
///
/// ```
/// use dialogue_games::arena::{Arena, ArenaConfig};
/// use dialogue_games::explorer::available_moves;
///
/// let arena = Arena::generate(&ArenaConfig::new(2, 2)).unwrap();
/// let opening: Vec<_> = available_moves(&arena, &[])
///     .iter()
///     .map(|m| m.address.to_string())
///     .collect();
/// assert_eq!(opening, vec!["1", "2"]);
/// ```
#[must_use]
pub fn available_moves<'a>(arena: &'a Arena, sequence: &[Move]) -> Vec<&'a Move> {
    let report = validate_position(arena, sequence);
    if !report.is_valid {
        trace!(
            "no moves available: position has {} violation(s)",
            report.violations.len()
        );
        return Vec::new();
    }
    legal_extensions(arena, sequence)
}

/// Moves extending `sequence`, which the caller has already validated.
pub(crate) fn legal_extensions<'a>(arena: &'a Arena, sequence: &[Move]) -> Vec<&'a Move> {
    let next = match sequence.last() {
        Some(last) => last.player.other(),
        None => arena.opener(),
    };

    // Linearity holds, so each address maps to exactly one index.
    let played: FxHashMap<&Address, usize> = sequence
        .iter()
        .enumerate()
        .map(|(i, mv)| (&mv.address, i))
        .collect();
    let visible: FxHashSet<usize> = view_indices(sequence, next).into_iter().collect();

    arena
        .moves()
        .iter()
        .filter(|mv| mv.player == next)
        .filter(|mv| !played.contains_key(&mv.address))
        .filter(|mv| {
            if mv.is_initial {
                return true;
            }
            let Some(parent) = mv.address.parent() else {
                return false;
            };
            match played.get(&parent) {
                Some(&j) => sequence[j].enables(mv) && visible.contains(&j),
                None => false,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaConfig;
    use crate::rules::validate_position;

    fn arena(depth: u32, ramification: u32) -> Arena {
        Arena::generate(&ArenaConfig::new(depth, ramification)).unwrap()
    }

    fn seq(arena: &Arena, addresses: &[&str]) -> Vec<Move> {
        addresses
            .iter()
            .map(|a| arena.move_at(&a.parse().unwrap()).unwrap().clone())
            .collect()
    }

    fn names(moves: &[&Move]) -> Vec<String> {
        moves.iter().map(|m| m.address.to_string()).collect()
    }

    #[test]
    fn test_opening_moves() {
        let arena = arena(2, 2);
        assert_eq!(names(&available_moves(&arena, &[])), vec!["1", "2"]);
    }

    #[test]
    fn test_after_claim() {
        let arena = arena(2, 2);
        let moves = seq(&arena, &["1"]);
        assert_eq!(names(&available_moves(&arena, &moves)), vec!["1.1", "1.2"]);
    }

    #[test]
    fn test_closing_move_has_no_answers() {
        let arena = arena(2, 2);
        let moves = seq(&arena, &["2"]);
        assert!(available_moves(&arena, &moves).is_empty());
    }

    #[test]
    fn test_new_thread_hides_old_branches() {
        let arena = arena(2, 2);
        let moves = seq(&arena, &["1", "1.1", "2"]);
        assert!(available_moves(&arena, &moves).is_empty());
    }

    #[test]
    fn test_illegal_position_has_no_moves() {
        let arena = arena(2, 2);
        let moves = seq(&arena, &["1", "1"]);
        assert!(available_moves(&arena, &moves).is_empty());
    }

    #[test]
    fn test_matches_append_and_validate() {
        let arena = arena(3, 3);
        let prefixes: [&[&str]; 4] = [&[], &["1"], &["1", "1.2"], &["2", "2.1", "2.1.1"]];

        for prefix in prefixes {
            let moves = seq(&arena, prefix);
            let available = available_moves(&arena, &moves);

            for candidate in arena.moves() {
                let mut extended = moves.clone();
                extended.push(candidate.clone());
                let legal = validate_position(&arena, &extended).is_valid;
                let listed = available.iter().any(|m| m.address == candidate.address);
                assert_eq!(legal, listed, "prefix {:?}, candidate {}", prefix, candidate);
            }
        }
    }
}
