use serde::{Deserialize, Serialize};

/// Tunables for the classical search. Every field has a default, so a config
/// file only needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest nominal iteration the engine will start.
    pub max_depth: u8,
    /// Extra plies the check extension may add on top of the nominal depth.
    pub cutoff_margin: u8,
    /// The clock is only read at nodes closer to the root than this.
    pub poll_ply_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            cutoff_margin: 8,
            poll_ply_threshold: 4,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
