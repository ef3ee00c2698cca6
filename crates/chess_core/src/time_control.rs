//! Search limits and the wall-clock deadline.
//!
//! The search is single-threaded and polls its deadline cooperatively, so a
//! deadline is nothing more than an optional instant compared against the
//! clock when asked.

use std::time::{Duration, Instant};

/// Search limits that control when an engine should stop searching.
///
/// The engine stops deepening at `max_depth` or when `move_time` has elapsed,
/// whichever comes first. An iteration cut short by the clock is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum nominal search depth in plies (half-moves)
    pub max_depth: u8,
    /// Wall-clock budget for this move (None = unbounded)
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    /// Create limits with only a depth constraint (no time limit).
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            move_time: None,
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(max_depth: u8, move_time: Duration) -> Self {
        Self {
            max_depth,
            move_time: Some(move_time),
        }
    }

    /// Create limits with only a time constraint. Depth is then bounded by
    /// the engine's own cap.
    pub fn time(move_time: Duration) -> Self {
        Self {
            max_depth: u8::MAX,
            move_time: Some(move_time),
        }
    }

    /// The deadline for a search that began at `start`.
    pub fn deadline(&self, start: Instant) -> Deadline {
        match self.move_time {
            Some(budget) => Deadline::after(start, budget),
            None => Deadline::none(),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// An optional point in time after which the search must give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self { at: None }
    }

    pub fn after(start: Instant, budget: Duration) -> Self {
        Self {
            at: start.checked_add(budget),
        }
    }

    /// Check the clock. This reads the system time, so callers decide how
    /// often it is worth asking.
    #[inline]
    pub fn expired(&self) -> bool {
        match self.at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
