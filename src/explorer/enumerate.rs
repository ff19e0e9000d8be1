//! Bounded breadth-first enumeration of reachable legal positions.
//!
//! Linearity strictly shrinks the set of playable addresses and arenas are
//! finite, so the tree of positions below any start is finite and
//! enumeration without a depth limit still terminates. The position cap,
//! the time budget and the cancel token bound the work on large arenas.
//!
//! The frontier is expanded in fixed-size chunks. With the `parallel`
//! feature each chunk fans out over `rayon`; every branch only reads the
//! shared arena and builds its own successors, and results are gathered in
//! frontier order, so output is identical either way.

use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::arena::Arena;
use crate::position::{Position, PositionAnalysis, PositionCache};
use crate::rules::validate_position;

use super::available::available_moves;
use super::config::{CancelToken, ExploreConfig};
use super::stats::ExploreStats;

/// Frontier positions expanded between limit checks.
const CHUNK_SIZE: usize = 64;

/// Positions found by an enumeration, with statistics.
#[derive(Clone, Debug, Default)]
pub struct Exploration {
    /// Positions in breadth-first order, start position first.
    pub positions: Vec<Position>,
    /// How the enumeration went.
    pub stats: ExploreStats,
}

/// Every legal position reachable from `start` within `config`'s limits.
///
/// ```
/// use dialogue_games::arena::{Arena, ArenaConfig};
/// use dialogue_games::explorer::{enumerate_positions, ExploreConfig};
/// use dialogue_games::position::Position;
///
/// let arena = Arena::generate(&ArenaConfig::new(2, 2)).unwrap();
/// let start = Position::new(&arena);
/// let positions = enumerate_positions(&arena, &start, &ExploreConfig::default());
///
/// // [], [1], [2], [1 1.1], [1 1.2], [1 1.1 2], [1 1.2 2]
/// assert_eq!(positions.len(), 7);
/// ```
#[must_use]
pub fn enumerate_positions(arena: &Arena, start: &Position, config: &ExploreConfig) -> Vec<Position> {
    explore(arena, start, config, &CancelToken::new()).positions
}

/// Enumerate like [`enumerate_positions`], observing `cancel` between
/// chunks and reporting statistics.
///
/// An illegal `start` yields no positions and sets
/// [`ExploreStats::invalid_start`].
#[must_use]
pub fn explore(
    arena: &Arena,
    start: &Position,
    config: &ExploreConfig,
    cancel: &CancelToken,
) -> Exploration {
    let start_is_valid = validate_position(arena, &start.to_vec()).is_valid;
    run_layers(arena, start, start_is_valid, config, cancel, |chunk| {
        expand_chunk(arena, chunk)
    })
}

/// Enumerate like [`explore`], reading and filling `cache` with the
/// analysis of every expanded position.
#[must_use]
pub fn explore_cached(
    arena: &Arena,
    start: &Position,
    config: &ExploreConfig,
    cancel: &CancelToken,
    cache: &mut PositionCache,
) -> Exploration {
    let start_is_valid = cache.get_or_compute(arena, start).validity.is_valid;
    run_layers(arena, start, start_is_valid, config, cancel, |chunk| {
        expand_chunk_cached(arena, chunk, cache)
    })
}

/// Every one-move legal extension of `position`, in arena order.
#[must_use]
pub fn successors(arena: &Arena, position: &Position) -> Vec<Position> {
    available_moves(arena, &position.to_vec())
        .into_iter()
        .map(|mv| position.extend(mv.clone()))
        .collect()
}

fn run_layers<F>(
    arena: &Arena,
    start: &Position,
    start_is_valid: bool,
    config: &ExploreConfig,
    cancel: &CancelToken,
    mut expand: F,
) -> Exploration
where
    F: FnMut(&[Position]) -> Vec<Vec<Position>>,
{
    let started = Instant::now();
    let mut stats = ExploreStats::new();
    let mut positions = Vec::new();

    if !start_is_valid {
        warn!("not enumerating {}: start position {} is illegal", arena.id(), start);
        stats.invalid_start = true;
        stats.time_us = started.elapsed().as_micros() as u64;
        return Exploration { positions, stats };
    }

    if config.max_positions == 0 {
        stats.truncated = true;
        return Exploration { positions, stats };
    }

    positions.push(start.clone());
    let mut frontier = vec![start.clone()];
    let mut depth = 0usize;

    'layers: while !frontier.is_empty() {
        if config.max_depth.is_some_and(|max| depth >= max) {
            break;
        }

        let mut next = Vec::new();
        for chunk in frontier.chunks(CHUNK_SIZE) {
            if should_stop(config, cancel, started) {
                stats.cancelled = true;
                break 'layers;
            }

            for children in expand(chunk) {
                stats.expansions += 1;
                if children.is_empty() {
                    stats.terminal_positions += 1;
                }

                for child in children {
                    if positions.len() >= config.max_positions {
                        stats.truncated = true;
                        break 'layers;
                    }
                    stats.max_depth_reached = depth + 1;
                    positions.push(child.clone());
                    next.push(child);
                }
            }
        }

        frontier = next;
        depth += 1;
    }

    stats.positions = positions.len();
    stats.time_us = started.elapsed().as_micros() as u64;

    if stats.truncated {
        warn!(
            "enumeration of {} truncated at {} positions",
            arena.id(),
            config.max_positions
        );
    }
    debug!(
        "enumerated {} positions of {} ({} expansions, depth {}, cancelled: {})",
        stats.positions,
        arena.id(),
        stats.expansions,
        stats.max_depth_reached,
        stats.cancelled
    );

    Exploration { positions, stats }
}

fn should_stop(config: &ExploreConfig, cancel: &CancelToken, started: Instant) -> bool {
    cancel.is_cancelled()
        || config
            .time_budget
            .is_some_and(|budget| started.elapsed() >= budget)
}

/// Successors of each chunk position from cached or freshly computed
/// analyses. Misses are analyzed together, in parallel when enabled.
fn expand_chunk_cached(
    arena: &Arena,
    chunk: &[Position],
    cache: &mut PositionCache,
) -> Vec<Vec<Position>> {
    let mut analyses: Vec<Option<Arc<PositionAnalysis>>> =
        chunk.iter().map(|p| cache.get(p)).collect();

    let missing: Vec<usize> = (0..chunk.len()).filter(|&i| analyses[i].is_none()).collect();
    let computed = analyze_all(arena, &missing, chunk);
    for (i, analysis) in missing.into_iter().zip(computed) {
        let analysis = Arc::new(analysis);
        cache.insert(chunk[i].clone(), Arc::clone(&analysis));
        analyses[i] = Some(analysis);
    }

    chunk
        .iter()
        .zip(analyses)
        .map(|(position, analysis)| match analysis {
            Some(analysis) => analysis
                .available
                .iter()
                .map(|mv| position.extend(mv.clone()))
                .collect(),
            None => Vec::new(),
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn expand_chunk(arena: &Arena, chunk: &[Position]) -> Vec<Vec<Position>> {
    use rayon::prelude::*;

    chunk.par_iter().map(|p| successors(arena, p)).collect()
}

#[cfg(not(feature = "parallel"))]
fn expand_chunk(arena: &Arena, chunk: &[Position]) -> Vec<Vec<Position>> {
    chunk.iter().map(|p| successors(arena, p)).collect()
}

#[cfg(feature = "parallel")]
fn analyze_all(arena: &Arena, indices: &[usize], chunk: &[Position]) -> Vec<PositionAnalysis> {
    use rayon::prelude::*;

    indices
        .par_iter()
        .map(|&i| PositionAnalysis::compute(arena, &chunk[i]))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn analyze_all(arena: &Arena, indices: &[usize], chunk: &[Position]) -> Vec<PositionAnalysis> {
    indices
        .iter()
        .map(|&i| PositionAnalysis::compute(arena, &chunk[i]))
        .collect()
}
