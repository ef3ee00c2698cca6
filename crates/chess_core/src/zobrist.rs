//! Zobrist hashing for chess positions.
//!
//! Zobrist hashing enables incremental hash updates during make, reducing hash
//! computation from O(64) to O(1) per move. Positions carry two lanes: one for
//! pawn placement only and one for everything else.
//!
//! The keys are:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Black to move (1 value)
//! - Castling rights, one value per rights nibble (16 values)
//! - En passant file (8 values)

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::board::CastlingRights;
use crate::types::{Color, PieceKind};

/// Random values for Zobrist hashing, reproducible from a seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pieces: [[[u64; 64]; 6]; 2],
    /// Indexed by the castling-rights bit set
    castling: [u64; 16],
    /// Indexed by en passant file (0-7)
    en_passant: [u64; 8],
    /// XOR-ed in while black is to move
    pub black_to_move: u64,
}

impl ZobristKeys {
    /// Draw every key from a `StdRng` seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in pieces.iter_mut() {
            for kind in color.iter_mut() {
                for key in kind.iter_mut() {
                    *key = rng.next_u64();
                }
            }
        }

        let mut castling = [0u64; 16];
        castling.iter_mut().for_each(|key| *key = rng.next_u64());

        let mut en_passant = [0u64; 8];
        en_passant.iter_mut().for_each(|key| *key = rng.next_u64());

        ZobristKeys {
            pieces,
            castling,
            en_passant,
            black_to_move: rng.next_u64(),
        }
    }

    /// Key for a piece on a square.
    #[inline(always)]
    pub fn piece_key(&self, color: Color, kind: PieceKind, sq: u8) -> u64 {
        self.pieces[color.idx()][kind.idx()][sq as usize]
    }

    /// Key for a complete set of castling rights.
    #[inline(always)]
    pub fn castling_key(&self, rights: CastlingRights) -> u64 {
        self.castling[rights.bits() as usize]
    }

    /// Key for en passant on a file (0-7).
    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
