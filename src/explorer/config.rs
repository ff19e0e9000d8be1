//! Enumeration limits and cancellation.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Limits for breadth-first position enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreConfig {
    /// Additional moves beyond the start position (`None` = until terminal).
    pub max_depth: Option<usize>,

    /// Maximum positions returned, start position included.
    /// Bounds memory on large arenas.
    pub max_positions: usize,

    /// Wall-clock budget; enumeration stops early once it is spent.
    pub time_budget: Option<Duration>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_positions: 10_000,
            time_budget: None,
        }
    }
}

impl ExploreConfig {
    /// Limit enumeration to `depth` additional moves.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Cap the number of positions returned.
    #[must_use]
    pub fn with_max_positions(mut self, count: usize) -> Self {
        self.max_positions = count;
        self
    }

    /// Stop after `budget` of wall-clock time.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }
}

/// Shared flag a caller flips to abandon an enumeration.
///
/// Clones observe the same flag, so one can be handed to another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Has cancellation been requested?
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
