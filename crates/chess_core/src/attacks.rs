//! Attack lookups for leapers and sliders.
//!
//! Knight and king attacks are static per-square tables. Sliding attacks use
//! the classical ray approach: one pre-computed ray per direction and square,
//! cut at the first blocker of the supplied occupancy. The tables live in an
//! [`AttackTables`] value that is built once and then only read.

use crate::bitboard::Bitboard;
use crate::types::PieceKind;

/// Which family of rays a slider moves along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderAxis {
    /// Rook-like: files and ranks.
    Orthogonal,
    /// Bishop-like: diagonals.
    Diagonal,
}

/// (file delta, rank delta) per direction: N, NE, E, SE, S, SW, W, NW.
const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ORTHOGONAL: [usize; 4] = [0, 2, 4, 6];
const DIAGONAL: [usize; 4] = [1, 3, 5, 7];

/// A ray grows toward higher square indices when its square delta is positive,
/// so the nearest blocker is the lowest set bit.
const fn ascending(dir: usize) -> bool {
    let (df, dr) = DIRECTIONS[dir];
    dr * 8 + df > 0
}

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut bits = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << (r * 8 + f);
            }
            i += 1;
        }
        table[sq] = Bitboard(bits);
        sq += 1;
    }
    table
}

const fn ray_table() -> [[Bitboard; 64]; 8] {
    let mut rays = [[Bitboard::EMPTY; 64]; 8];
    let mut dir = 0;
    while dir < 8 {
        let (df, dr) = DIRECTIONS[dir];
        let mut sq = 0;
        while sq < 64 {
            let mut f = (sq % 8) as i8 + df;
            let mut r = (sq / 8) as i8 + dr;
            let mut bits = 0u64;
            while f >= 0 && f < 8 && r >= 0 && r < 8 {
                bits |= 1u64 << (r * 8 + f);
                f += df;
                r += dr;
            }
            rays[dir][sq] = Bitboard(bits);
            sq += 1;
        }
        dir += 1;
    }
    rays
}

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Pre-computed attack tables.
///
/// Every query is a pure function of its arguments and touches only
/// immutable data, so one instance can serve any number of positions.
#[derive(Clone, PartialEq, Eq)]
pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    /// rays[direction][square]: every square in that direction, excluding the origin.
    rays: [[Bitboard; 64]; 8],
}

impl AttackTables {
    pub fn new() -> Self {
        Self {
            knight: leaper_table(&KNIGHT_DELTAS),
            king: leaper_table(&DIRECTIONS),
            rays: ray_table(),
        }
    }

    #[inline(always)]
    pub fn knight(&self, sq: u8) -> Bitboard {
        self.knight[sq as usize]
    }

    #[inline(always)]
    pub fn king(&self, sq: u8) -> Bitboard {
        self.king[sq as usize]
    }

    /// Static attacks for the two leaping kinds.
    ///
    /// # Panics
    /// If `kind` is not a knight or king.
    #[inline(always)]
    pub fn leaper(&self, kind: PieceKind, sq: u8) -> Bitboard {
        match kind {
            PieceKind::Knight => self.knight(sq),
            PieceKind::King => self.king(sq),
            _ => panic!("{kind:?} is not a leaper"),
        }
    }

    /// Rays along `axis` from `sq`, each stopped at (and including) the first
    /// occupied square. `occupied` is the union of both colors.
    #[inline]
    pub fn sliding(&self, axis: SliderAxis, sq: u8, occupied: Bitboard) -> Bitboard {
        let dirs = match axis {
            SliderAxis::Orthogonal => &ORTHOGONAL,
            SliderAxis::Diagonal => &DIAGONAL,
        };
        let mut attacks = Bitboard::EMPTY;
        for &dir in dirs {
            attacks |= self.ray(dir, sq, occupied);
        }
        attacks
    }

    #[inline(always)]
    fn ray(&self, dir: usize, sq: u8, occupied: Bitboard) -> Bitboard {
        let ray = self.rays[dir][sq as usize];
        let nearest = if ascending(dir) {
            (ray & occupied).lsb()
        } else {
            (ray & occupied).msb()
        };
        match nearest {
            Some(blocker) => ray & !self.rays[dir][blocker as usize],
            None => ray,
        }
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttackTables").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
