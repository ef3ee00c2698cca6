pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod state;
pub mod tables;
pub mod time_control;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use bitboard::*;
pub use board::*;
pub use error::{FenError, MoveParseError};
pub use eval::evaluate;
pub use movegen::*;
pub use notation::parse_move;
pub use perft::{perft, perft_divide};
pub use state::{MAX_PLY, SearchState};
pub use tables::{DEFAULT_ZOBRIST_SEED, EngineTables};
pub use time_control::*;
pub use types::*;
pub use zobrist::ZobristKeys;

// =============================================================================
// Engine trait
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Score of the last completed iteration, positive when white is better
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
    /// Whether the deadline cut the search short
    pub stopped: bool,
}

/// Trait implemented by move-choosing engines.
pub trait Engine: Send {
    /// Search the top position of `state` within `limits`.
    ///
    /// # Arguments
    /// * `state` - Search stack whose top entry is the position to analyze;
    ///   it is returned at the same ply
    /// * `limits` - Search limits (depth, time)
    ///
    /// # Returns
    /// SearchResult containing best move, score, and statistics
    fn search(&mut self, state: &mut SearchState<'_>, limits: &SearchLimits) -> SearchResult;

    /// Returns the engine's name
    fn name(&self) -> &str;

    /// Returns the engine's author
    fn author(&self) -> &str {
        "clce"
    }
}
