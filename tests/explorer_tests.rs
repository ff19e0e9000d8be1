//! Explorer integration tests: available moves, enumeration, undo/redo.

use std::sync::Arc;
use std::time::Duration;

use dialogue_games::explorer::{explore, CancelToken, ExploreConfig, PositionExplorer};
use dialogue_games::{
    enumerate_positions, generate_arena, random_playout, Arena, ArenaConfig, EngineError, Player,
    PlayoutRng, Position,
};

fn shared(depth: u32, ramification: u32) -> Arc<Arena> {
    Arc::new(generate_arena(&ArenaConfig::new(depth, ramification)).unwrap())
}

// =============================================================================
// Enumeration
// =============================================================================

#[test]
fn test_enumeration_terminates_without_depth_limit() {
    let arena = shared(3, 2);
    let positions = enumerate_positions(&arena, &[], None, usize::MAX);

    assert!(!positions.is_empty());
    assert!(positions.iter().all(|p| p.len() <= arena.len()));
    assert_eq!(positions[0], Position::new(&arena));
}

#[test]
fn test_enumerated_positions_alternate() {
    let arena = shared(3, 3);
    for position in enumerate_positions(&arena, &[], None, 5_000) {
        let moves = position.to_vec();
        for pair in moves.windows(2) {
            assert_ne!(pair[0].player, pair[1].player, "{}", position);
        }
        if let Some(first) = moves.first() {
            assert_eq!(first.player, Player::Proponent);
        }
    }
}

#[test]
fn test_enumeration_from_sequence() {
    let arena = shared(2, 2);
    let start = vec![arena.move_at(&"1".parse().unwrap()).unwrap().clone()];

    let positions = enumerate_positions(&arena, &start, Some(1), 100);
    let printed: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
    assert_eq!(printed, vec!["[P:1]", "[P:1 O:1.1]", "[P:1 O:1.2]"]);
}

#[test]
fn test_illegal_start_enumerates_nothing() {
    let arena = shared(2, 2);
    let claim = arena.move_at(&"1".parse().unwrap()).unwrap().clone();
    let repeated = vec![claim.clone(), claim];

    assert!(enumerate_positions(&arena, &repeated, None, 100).is_empty());

    let start = Position::from_moves(&arena, repeated);
    let exploration = explore(&arena, &start, &ExploreConfig::default(), &CancelToken::new());
    assert!(exploration.positions.is_empty());
    assert!(exploration.stats.invalid_start);
    assert!(!exploration.stats.is_complete());
}

#[test]
fn test_explorer_enumeration_reuses_cache() {
    let mut explorer = PositionExplorer::new(shared(2, 2));
    let config = ExploreConfig::default();

    let first = explorer.enumerate(&config, &CancelToken::new());
    let misses = explorer.cache_stats().misses;
    let second = explorer.enumerate(&config, &CancelToken::new());

    assert_eq!(first.positions, second.positions);
    assert_eq!(explorer.cache_stats().misses, misses);
    assert!(explorer.cache_stats().hits > 0);
}

#[test]
fn test_capped_enumeration_reports_truncation() {
    let arena = shared(4, 3);
    let config = ExploreConfig::default().with_max_positions(25);
    let exploration = explore(&arena, &Position::new(&arena), &config, &CancelToken::new());

    assert_eq!(exploration.positions.len(), 25);
    assert_eq!(exploration.stats.positions, 25);
    assert!(exploration.stats.truncated);
}

#[test]
fn test_cancel_from_another_thread() {
    let arena = shared(3, 3);
    let cancel = CancelToken::new();
    let handle = cancel.clone();

    std::thread::spawn(move || handle.cancel()).join().unwrap();

    let exploration = explore(
        &arena,
        &Position::new(&arena),
        &ExploreConfig::default().with_time_budget(Duration::from_secs(60)),
        &cancel,
    );
    assert!(exploration.stats.cancelled);
    assert_eq!(exploration.positions.len(), 1);
}

// =============================================================================
// PositionExplorer
// =============================================================================

#[test]
fn test_walk_to_terminal() {
    let mut explorer = PositionExplorer::new(shared(2, 2));

    for address in ["1", "1.2", "2"] {
        explorer.make_move_at(&address.parse().unwrap()).unwrap();
        assert!(explorer.validity().is_valid);
    }

    assert!(explorer.is_terminal());
    assert_eq!(explorer.current_player(), Player::Opponent);
    assert_eq!(explorer.winner(), Some(Player::Proponent));
    assert_eq!(explorer.views().o_view.len(), 1);
}

#[test]
fn test_illegal_move_leaves_position() {
    let mut explorer = PositionExplorer::new(shared(2, 2));
    explorer.make_move_at(&"1".parse().unwrap()).unwrap();

    let again = explorer.make_move_at(&"1".parse().unwrap());
    assert!(matches!(again, Err(EngineError::IllegalMove { .. })));
    assert_eq!(explorer.position().len(), 1);
    assert_eq!(explorer.available_moves().len(), 2);
}

#[test]
fn test_undo_restores_available_moves() {
    let mut explorer = PositionExplorer::new(shared(3, 3));
    let mut history = vec![explorer.available_moves().to_vec()];

    for _ in 0..4 {
        let Some(next) = explorer.available_moves().first().cloned() else {
            break;
        };
        explorer.make_move(&next).unwrap();
        history.push(explorer.available_moves().to_vec());
    }

    history.pop();
    while explorer.undo().is_some() {
        assert_eq!(Some(explorer.available_moves().to_vec()), history.pop());
    }
    assert!(history.is_empty());
}

#[test]
fn test_playout_matches_free_function() {
    let arena = shared(3, 3);
    let explorer = PositionExplorer::new(arena.clone());

    let a = explorer.playout(&mut PlayoutRng::new(77), 50);
    let b = random_playout(&arena, &Position::new(&arena), &mut PlayoutRng::new(77), 50);
    assert_eq!(a, b);
    assert!(a.is_terminal(&arena));
}
