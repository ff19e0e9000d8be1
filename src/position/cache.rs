//! Bounded least-recently-used cache of position analyses.
//!
//! Validity, views and available moves are pure functions of the arena and
//! the move sequence, so an explorer that walks back and forth (undo, redo,
//! repeated enumeration) can reuse them. The key is the whole [`Position`],
//! which carries its arena id, so analyses of different arenas never mix.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::arena::Arena;
use crate::core::Move;
use crate::explorer::available::legal_extensions;
use crate::rules::{validate_position, ValidityReport};

use super::position::Position;
use super::views::{compute_views, Views};

/// Default number of analyses kept.
pub const DEFAULT_CACHE_CAPACITY: usize = 1_000;

/// Everything derived from one position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionAnalysis {
    /// Legality report.
    pub validity: ValidityReport,
    /// P-view and O-view.
    pub views: Views,
    /// Legal one-move extensions, in arena order. Empty when invalid.
    pub available: Vec<Move>,
    /// No move is available.
    pub is_terminal: bool,
}

impl PositionAnalysis {
    /// Analyze `position` against `arena`.
    #[must_use]
    pub fn compute(arena: &Arena, position: &Position) -> Self {
        let sequence = position.to_vec();
        let validity = validate_position(arena, &sequence);
        let available: Vec<Move> = if validity.is_valid {
            legal_extensions(arena, &sequence)
                .into_iter()
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        Self {
            validity,
            views: compute_views(&sequence),
            is_terminal: available.is_empty(),
            available,
        }
    }
}

/// Cache counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
    /// Entries currently held.
    pub size: usize,
    /// Maximum entries held.
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups that hit.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    analysis: Arc<PositionAnalysis>,
    last_used: u64,
}

/// LRU cache from positions to their analyses.
///
/// ```
/// use dialogue_games::arena::{Arena, ArenaConfig};
/// use dialogue_games::position::{Position, PositionCache};
///
/// let arena = Arena::generate(&ArenaConfig::new(2, 2)).unwrap();
/// let mut cache = PositionCache::new(16);
///
/// let start = Position::new(&arena);
/// let first = cache.get_or_compute(&arena, &start);
/// let again = cache.get_or_compute(&arena, &start);
/// assert_eq!(first, again);
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Clone, Debug)]
pub struct PositionCache {
    capacity: usize,
    entries: FxHashMap<Position, CacheEntry>,
    /// Last-use tick to key; the first entry is the eviction candidate.
    recency: BTreeMap<u64, Position>,
    tick: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PositionCache {
    /// A cache holding at most `capacity` analyses. Zero disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: FxHashMap::default(),
            recency: BTreeMap::new(),
            tick: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Maximum entries held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the cache empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Is `position` cached? Does not touch recency or counters.
    #[must_use]
    pub fn contains(&self, position: &Position) -> bool {
        self.entries.contains_key(position)
    }

    /// Cached analysis of `position`, marking it most recently used.
    pub fn get(&mut self, position: &Position) -> Option<Arc<PositionAnalysis>> {
        let tick = self.next_tick();
        match self.entries.get_mut(position) {
            Some(entry) => {
                self.recency.remove(&entry.last_used);
                entry.last_used = tick;
                self.recency.insert(tick, position.clone());
                self.hits += 1;
                Some(Arc::clone(&entry.analysis))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store `analysis`, evicting the least recently used entries if full.
    pub fn insert(&mut self, position: Position, analysis: Arc<PositionAnalysis>) {
        if self.capacity == 0 {
            return;
        }
        let tick = self.next_tick();
        let entry = CacheEntry {
            analysis,
            last_used: tick,
        };

        match self.entries.insert(position.clone(), entry) {
            Some(replaced) => {
                self.recency.remove(&replaced.last_used);
            }
            None => {
                while self.entries.len() > self.capacity {
                    if !self.evict_oldest() {
                        break;
                    }
                }
            }
        }
        self.recency.insert(tick, position);
    }

    /// Cached analysis of `position`, computing and storing it on a miss.
    pub fn get_or_compute(&mut self, arena: &Arena, position: &Position) -> Arc<PositionAnalysis> {
        if let Some(hit) = self.get(position) {
            return hit;
        }
        let analysis = Arc::new(PositionAnalysis::compute(arena, position));
        self.insert(position.clone(), Arc::clone(&analysis));
        analysis
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            size: self.entries.len(),
            capacity: self.capacity,
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn evict_oldest(&mut self) -> bool {
        match self.recency.pop_first() {
            Some((_, position)) => {
                self.entries.remove(&position);
                self.evictions += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaConfig;

    fn arena() -> Arena {
        Arena::generate(&ArenaConfig::new(2, 2)).unwrap()
    }

    fn position(arena: &Arena, addresses: &[&str]) -> Position {
        Position::from_moves(
            arena,
            addresses
                .iter()
                .map(|a| arena.move_at(&a.parse().unwrap()).unwrap().clone()),
        )
    }

    #[test]
    fn test_analysis_of_legal_position() {
        let arena = arena();
        let analysis = PositionAnalysis::compute(&arena, &position(&arena, &["1"]));

        assert!(analysis.validity.is_valid);
        assert!(!analysis.is_terminal);
        let next: Vec<String> = analysis.available.iter().map(|m| m.address.to_string()).collect();
        assert_eq!(next, vec!["1.1", "1.2"]);
        assert_eq!(analysis.views.o_view.len(), 1);
    }

    #[test]
    fn test_analysis_of_illegal_position() {
        let arena = arena();
        let analysis = PositionAnalysis::compute(&arena, &position(&arena, &["1", "1"]));

        assert!(!analysis.validity.is_valid);
        assert!(analysis.available.is_empty());
        assert!(analysis.is_terminal);
    }

    #[test]
    fn test_hit_and_miss() {
        let arena = arena();
        let mut cache = PositionCache::new(4);
        let start = position(&arena, &[]);

        assert!(cache.get(&start).is_none());
        let computed = cache.get_or_compute(&arena, &start);
        let cached = cache.get_or_compute(&arena, &start);
        assert!(Arc::ptr_eq(&computed, &cached));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.size, 1);
        assert!((stats.hit_rate() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let arena = arena();
        let mut cache = PositionCache::new(2);
        let a = position(&arena, &[]);
        let b = position(&arena, &["1"]);
        let c = position(&arena, &["2"]);

        cache.get_or_compute(&arena, &a);
        cache.get_or_compute(&arena, &b);
        cache.get(&a);
        cache.get_or_compute(&arena, &c);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert!(cache.contains(&c));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_reinsert_does_not_evict() {
        let arena = arena();
        let mut cache = PositionCache::new(2);
        let a = position(&arena, &[]);
        let b = position(&arena, &["1"]);

        cache.get_or_compute(&arena, &a);
        cache.get_or_compute(&arena, &b);
        let analysis = Arc::new(PositionAnalysis::compute(&arena, &a));
        cache.insert(a.clone(), analysis);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let arena = arena();
        let mut cache = PositionCache::new(0);
        let start = position(&arena, &[]);

        cache.get_or_compute(&arena, &start);
        cache.get_or_compute(&arena, &start);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_clear() {
        let arena = arena();
        let mut cache = PositionCache::default();
        assert_eq!(cache.capacity(), DEFAULT_CACHE_CAPACITY);

        cache.get_or_compute(&arena, &position(&arena, &["1"]));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }
}
