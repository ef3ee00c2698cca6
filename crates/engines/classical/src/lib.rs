//! Classical Chess Engine
//!
//! Iterative deepening over a fail-hard alpha-beta minimax with a check
//! extension, bounded by a wall-clock deadline. Evaluation is pluggable and
//! defaults to plain material counting.

mod config;
mod eval;
mod search;

use std::time::{Duration, Instant};

use chess_core::{
    Engine, MAX_PLY, Move, MoveList, SearchLimits, SearchResult, SearchState, legal_moves,
};
use tracing::{debug, warn};

pub use config::SearchConfig;
pub use eval::{Evaluator, Material};
pub use search::{INFINITY, MATE_SCORE, Scored, Searcher, is_mate_score};

/// One completed iteration of the deepening loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationReport {
    pub depth: u8,
    pub score: i32,
    pub best_move: Move,
    /// Nodes across all iterations so far
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Classical chess engine using minimax with alpha-beta pruning.
///
/// This engine uses:
/// - Fail-hard alpha-beta over white-positive scores
/// - An unconditional check extension under a hard ply cutoff
/// - Repetition and fifty-move draws inside the tree
/// - Iterative deepening that only trusts completed iterations
#[derive(Debug, Clone, Default)]
pub struct ClassicalEngine<E: Evaluator = Material> {
    config: SearchConfig,
    evaluator: E,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, Material)
    }
}

impl<E: Evaluator> ClassicalEngine<E> {
    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Deepest nominal depth that fits the stack above `root_ply`, leaving
    /// room for the check extension and one legality-verification ply.
    pub fn depth_cap(&self, root_ply: usize) -> u8 {
        let reserved = root_ply + self.config.cutoff_margin as usize + 2;
        MAX_PLY.saturating_sub(reserved).min(u8::MAX as usize) as u8
    }

    /// Run iterative deepening, calling `on_iteration` after every completed
    /// depth.
    ///
    /// The returned move is the best move of the deepest completed iteration.
    /// If not even depth 1 completes, it is the first legal move.
    pub fn search_with(
        &mut self,
        state: &mut SearchState<'_>,
        limits: &SearchLimits,
        mut on_iteration: impl FnMut(&IterationReport),
    ) -> SearchResult {
        let start = Instant::now();
        let deadline = limits.deadline(start);
        self.nodes = 0;

        let mut root_moves = MoveList::new();
        legal_moves(state, &mut root_moves);
        let Some(&first) = root_moves.first() else {
            debug!(fen = %state.position().to_fen(state.fullmove_number()), "no legal moves at the root");
            return SearchResult {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: 0,
                stopped: false,
            };
        };

        let max_depth = limits
            .max_depth
            .min(self.config.max_depth)
            .min(self.depth_cap(state.ply()));
        let mut result = SearchResult {
            best_move: Some(first),
            score: self.evaluator.evaluate(state.position()),
            depth: 0,
            nodes: 0,
            stopped: false,
        };

        for depth in 1..=max_depth {
            let cutoff = depth.saturating_add(self.config.cutoff_margin);
            let mut searcher = Searcher::new(
                state,
                &self.evaluator,
                deadline,
                self.config.poll_ply_threshold,
            );
            let outcome = searcher.minimax(depth, cutoff, -INFINITY, INFINITY);
            self.nodes += searcher.nodes();

            match outcome {
                Some(Scored {
                    score,
                    best: Some(best_move),
                }) => {
                    result.best_move = Some(best_move);
                    result.score = score;
                    result.depth = depth;
                    let report = IterationReport {
                        depth,
                        score,
                        best_move,
                        nodes: self.nodes,
                        elapsed: start.elapsed(),
                    };
                    debug!(depth, score, best_move = %best_move, nodes = self.nodes, "iteration complete");
                    on_iteration(&report);
                }
                Some(Scored { best: None, .. }) => break,
                None => {
                    result.stopped = true;
                    break;
                }
            }
        }

        if result.stopped && result.depth == 0 {
            warn!(fallback = %first, "deadline passed before depth 1 completed");
        }
        result.nodes = self.nodes;
        result
    }
}

impl<E: Evaluator + Send> Engine for ClassicalEngine<E> {
    fn search(&mut self, state: &mut SearchState<'_>, limits: &SearchLimits) -> SearchResult {
        self.search_with(state, limits, |_| {})
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }
}
