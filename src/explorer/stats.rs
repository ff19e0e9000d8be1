//! Enumeration statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one enumeration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreStats {
    /// Positions returned, start position included.
    pub positions: usize,

    /// Positions whose successors were computed.
    pub expansions: usize,

    /// Expanded positions that had no available move.
    pub terminal_positions: usize,

    /// Deepest layer reached (moves beyond the start position).
    pub max_depth_reached: usize,

    /// Stopped because `max_positions` was hit.
    pub truncated: bool,

    /// Stopped by a cancel token or the time budget.
    pub cancelled: bool,

    /// The start position was illegal, so nothing was enumerated.
    pub invalid_start: bool,

    /// Total time spent (microseconds).
    pub time_us: u64,
}

impl ExploreStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Did enumeration visit the whole bounded tree?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.truncated && !self.cancelled && !self.invalid_start
    }

    /// Positions produced per second.
    #[must_use]
    pub fn positions_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.positions as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average successors per expanded position.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.expansions == 0 {
            0.0
        } else {
            // Every position except the start is some expansion's successor.
            self.positions.saturating_sub(1) as f64 / self.expansions as f64
        }
    }
}
