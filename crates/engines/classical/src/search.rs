//! Fail-hard alpha-beta minimax with a check extension.
//!
//! Scores are white-positive: white nodes raise alpha, black nodes lower beta.
//! A node searched with `depth` hands `depth - 1` to its children, except that
//! a child whose side to move is in check keeps `depth`. The independent
//! `cutoff` budget shrinks by one on every ply regardless, so chains of checks
//! still terminate.

use chess_core::{Color, Deadline, Move, MoveList, SearchState, legal_moves};

use crate::eval::Evaluator;

/// Score of being mated at the root. Mates further away score closer to zero.
pub const MATE_SCORE: i32 = 655_535;

/// Bound wider than any reachable score.
pub const INFINITY: i32 = MATE_SCORE + 1;

/// Whether `score` encodes a forced mate for either side.
pub fn is_mate_score(score: i32) -> bool {
    score.abs() > MATE_SCORE - chess_core::MAX_PLY as i32
}

/// Outcome of a fully searched node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    pub score: i32,
    /// The move that set the bound, if any move improved on it.
    pub best: Option<Move>,
}

/// One fixed-depth search over a borrowed stack.
pub struct Searcher<'a, 's, 't, E: Evaluator> {
    state: &'s mut SearchState<'t>,
    evaluator: &'a E,
    deadline: Deadline,
    poll_ply_threshold: usize,
    root_ply: usize,
    nodes: u64,
}

impl<'a, 's, 't, E: Evaluator> Searcher<'a, 's, 't, E> {
    pub fn new(
        state: &'s mut SearchState<'t>,
        evaluator: &'a E,
        deadline: Deadline,
        poll_ply_threshold: usize,
    ) -> Self {
        let root_ply = state.ply();
        Self {
            state,
            evaluator,
            deadline,
            poll_ply_threshold,
            root_ply,
            nodes: 0,
        }
    }

    /// Positions made so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline(always)]
    fn relative_ply(&self) -> usize {
        self.state.ply() - self.root_ply
    }

    /// Score for the side to move at the top of the stack being checkmated.
    fn mated_score(&self) -> i32 {
        let mate = MATE_SCORE - self.relative_ply() as i32;
        match self.state.side_to_move() {
            Color::White => -mate,
            Color::Black => mate,
        }
    }

    /// A position whose halfmove clock ran out is drawn unless the move that
    /// got there delivered mate.
    fn fifty_move_score(&mut self) -> i32 {
        if !self.state.in_check() {
            return 0;
        }
        let mut replies = MoveList::new();
        legal_moves(self.state, &mut replies);
        if replies.is_empty() { self.mated_score() } else { 0 }
    }

    /// Search the top of the stack. `None` means the deadline passed and the
    /// whole call must be discarded; the stack is back at the entry ply
    /// either way.
    ///
    /// # Arguments
    /// * `depth` - Nominal plies left, at least 1
    /// * `cutoff` - Hard ply budget, at least 1
    /// * `alpha`, `beta` - Window; white raises alpha, black lowers beta
    pub fn minimax(&mut self, depth: u8, cutoff: u8, mut alpha: i32, mut beta: i32) -> Option<Scored> {
        debug_assert!(depth > 0 && cutoff > 0);

        let mut moves = MoveList::new();
        legal_moves(self.state, &mut moves);

        let white = self.state.side_to_move() == Color::White;
        if moves.is_empty() {
            let score = if self.state.in_check() { self.mated_score() } else { 0 };
            return Some(Scored { score, best: None });
        }

        let mut best = None;
        for &mv in moves.iter() {
            self.state.make(mv);
            self.nodes += 1;

            let score = if self.state.is_repetition() {
                0
            } else if self.state.position().is_fifty_move_draw() {
                self.fifty_move_score()
            } else {
                let child_depth = if self.state.in_check() { depth } else { depth - 1 };
                let child_cutoff = cutoff - 1;
                if child_depth == 0 || child_cutoff == 0 {
                    self.evaluator.evaluate(self.state.position())
                } else {
                    match self.minimax(child_depth, child_cutoff, alpha, beta) {
                        Some(child) => child.score,
                        None => {
                            self.state.unmake(mv);
                            return None;
                        }
                    }
                }
            };

            self.state.unmake(mv);

            if self.relative_ply() < self.poll_ply_threshold && self.deadline.expired() {
                return None;
            }

            if white {
                if score >= beta {
                    return Some(Scored { score: beta, best: Some(mv) });
                }
                if score > alpha {
                    alpha = score;
                    best = Some(mv);
                }
            } else {
                if score <= alpha {
                    return Some(Scored { score: alpha, best: Some(mv) });
                }
                if score < beta {
                    beta = score;
                    best = Some(mv);
                }
            }
        }

        let score = if white { alpha } else { beta };
        Some(Scored { score, best })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
