//! The per-search position stack.
//!
//! `SearchState` stores one [`Position`] per ply. Making a move copies the
//! top entry one slot up and mutates the copy; unmaking only moves the cursor
//! back. Entries below the cursor are never touched again, which is what makes
//! the retraction a complete undo.

use crate::board::{Position, STARTPOS_FEN};
use crate::error::FenError;
use crate::movegen;
use crate::tables::EngineTables;
use crate::types::{Color, Move};

/// Capacity of the position stack, in plies.
pub const MAX_PLY: usize = 128;

pub struct SearchState<'t> {
    tables: &'t EngineTables,
    stack: Box<[Position]>,
    ply: usize,
    root_fullmove: u32,
}

impl<'t> SearchState<'t> {
    /// A stack with `root` at ply 0.
    pub fn new(tables: &'t EngineTables, root: Position, fullmove_number: u32) -> Self {
        let mut stack = vec![Position::EMPTY; MAX_PLY].into_boxed_slice();
        stack[0] = root;
        Self {
            tables,
            stack,
            ply: 0,
            root_fullmove: fullmove_number,
        }
    }

    pub fn from_fen(tables: &'t EngineTables, fen: &str) -> Result<Self, FenError> {
        let parsed = Position::parse_fen(fen, tables)?;
        Ok(Self::new(tables, parsed.position, parsed.fullmove_number))
    }

    pub fn startpos(tables: &'t EngineTables) -> Self {
        Self::from_fen(tables, STARTPOS_FEN).expect("start position FEN is valid")
    }

    #[inline(always)]
    pub fn tables(&self) -> &'t EngineTables {
        self.tables
    }

    #[inline(always)]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// The position at the top of the stack.
    #[inline(always)]
    pub fn position(&self) -> &Position {
        &self.stack[self.ply]
    }

    /// An earlier (or the current) entry of the stack.
    ///
    /// # Panics
    /// If `ply` is above the cursor.
    pub fn position_at(&self, ply: usize) -> &Position {
        assert!(ply <= self.ply, "ply {ply} is above the cursor {}", self.ply);
        &self.stack[ply]
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.position().side_to_move
    }

    /// Fullmove number of the top position, counting from the root's.
    pub fn fullmove_number(&self) -> u32 {
        let black_root = self.stack[0].side_to_move == Color::Black;
        self.root_fullmove + ((self.ply + black_root as usize) / 2) as u32
    }

    /// Copy the top position one slot up and play `mv` on the copy.
    ///
    /// `mv` must be legal (or at least pseudo-legal) for the top position.
    ///
    /// # Panics
    /// If the stack is full.
    #[inline]
    pub fn make(&mut self, mv: Move) {
        assert!(
            self.ply + 1 < MAX_PLY,
            "search stack overflow at ply {}",
            self.ply
        );
        let next = self.ply + 1;
        self.stack[next] = self.stack[self.ply];
        self.ply = next;
        self.stack[next].apply_move(mv, &self.tables.zobrist);
    }

    /// Retract the cursor by one ply. `_mv` is not inspected.
    ///
    /// # Panics
    /// At ply 0.
    #[inline]
    pub fn unmake(&mut self, _mv: Move) {
        assert!(self.ply > 0, "unmake at the root of the search stack");
        self.ply -= 1;
    }

    /// Earlier plies whose hash lanes equal the current ones, newest first.
    fn earlier_matches(&self) -> impl Iterator<Item = usize> + '_ {
        let now = self.position();
        (0..self.ply).rev().filter(move |&p| {
            let then = &self.stack[p];
            then.pawn_hash == now.pawn_hash && then.non_pawn_hash == now.non_pawn_hash
        })
    }

    /// Any earlier ply has the same (pawn hash, non-pawn hash) pair.
    pub fn is_repetition(&self) -> bool {
        self.earlier_matches().next().is_some()
    }

    /// Number of earlier plies with the same hash pair.
    pub fn repetition_count(&self) -> usize {
        self.earlier_matches().count()
    }

    /// The current position is arriving for at least the third time.
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 2
    }

    /// The side to move is in check.
    pub fn in_check(&self) -> bool {
        movegen::in_check(self.position(), &self.tables.attacks)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
