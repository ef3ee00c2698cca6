//! Legal move generation.
//!
//! Candidates are generated per piece kind from bitboards, then run through a
//! legality filter. Most candidates are accepted by a cheap test against the
//! opponent's attack set; the rest are played on the search stack and checked
//! for king safety.

use std::ops::Deref;

use crate::attacks::{AttackTables, SliderAxis};
use crate::bitboard::Bitboard;
use crate::board::Position;
use crate::state::SearchState;
use crate::types::*;

/// Upper bound on moves in any position, with room to spare.
pub const MAX_MOVES: usize = 256;

/// Fixed-capacity move buffer that lives on the caller's stack.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Remove the move at `index` by moving the last move into its slot.
    /// Does not preserve order.
    #[inline(always)]
    pub fn swap_remove(&mut self, index: usize) -> Move {
        assert!(index < self.len, "index {index} out of bounds ({})", self.len);
        let mv = self.moves[index];
        self.len -= 1;
        self.moves[index] = self.moves[self.len];
        mv
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Which candidates to generate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenKind {
    #[default]
    All,
    /// No captures: ordinary captures, en passant and capture-promotions are skipped.
    Quiet,
}

/// Every square attacked by `by`'s pieces, given the current occupancy.
///
/// Squares holding `by`'s own pieces are included when attacked.
pub fn attack_set(pos: &Position, attacks: &AttackTables, by: Color) -> Bitboard {
    let occupied = pos.occupied();
    let pawns = pos.pieces_of(by, PieceKind::Pawn);
    let fwd = by.forward();
    let mut set = (pawns.shift(fwd + 1) & Bitboard::NOT_FILE_A)
        | (pawns.shift(fwd - 1) & Bitboard::NOT_FILE_H);

    for sq in pos.pieces_of(by, PieceKind::Knight) {
        set |= attacks.knight(sq);
    }
    for sq in pos.pieces_of(by, PieceKind::King) {
        set |= attacks.king(sq);
    }
    let queens = pos.pieces_of(by, PieceKind::Queen);
    for sq in pos.pieces_of(by, PieceKind::Bishop) | queens {
        set |= attacks.sliding(SliderAxis::Diagonal, sq, occupied);
    }
    for sq in pos.pieces_of(by, PieceKind::Rook) | queens {
        set |= attacks.sliding(SliderAxis::Orthogonal, sq, occupied);
    }
    set
}

/// `color`'s king stands on a square the other side attacks.
pub fn king_attacked(pos: &Position, attacks: &AttackTables, color: Color) -> bool {
    attack_set(pos, attacks, color.other()).contains(pos.king_square(color))
}

/// The side to move is in check.
#[inline]
pub fn in_check(pos: &Position, attacks: &AttackTables) -> bool {
    king_attacked(pos, attacks, pos.side_to_move)
}

/// All legal moves for the top of the stack.
pub fn legal_moves(state: &mut SearchState<'_>, out: &mut MoveList) {
    generate_legal_moves(state, out, GenKind::All);
}

/// Fill `out` with the legal moves of `kind` for the position at the top of
/// `state`. The stack is borrowed for verification and left as it was found.
///
/// Output order is deterministic for a given position but is not the
/// generation order: rejected moves are swap-removed.
pub fn generate_legal_moves(state: &mut SearchState<'_>, out: &mut MoveList, kind: GenKind) {
    out.clear();
    let attacks = &state.tables().attacks;
    let pos = state.position();
    let us = pos.side_to_move;
    let king_sq = pos.king_square(us);
    let enemy_attacks = attack_set(pos, attacks, us.other());
    let checked = enemy_attacks.contains(king_sq);

    pawn_moves(pos, kind, out);
    piece_moves(pos, attacks, kind, out);
    castling_moves(pos, enemy_attacks, out);

    let mut i = 0;
    while i < out.len() {
        let mv = out[i];
        // A piece that is not attacked cannot be pinned, so moving it is safe
        // unless we are in check already or it takes en passant.
        let trivially_safe = !checked
            && mv.from() != king_sq
            && !enemy_attacks.contains(mv.from())
            && mv.special() != Special::EnPassant;
        if trivially_safe || keeps_king_safe(state, mv) {
            i += 1;
        } else {
            out.swap_remove(i);
        }
    }
}

/// Play `mv`, look at the mover's king, take it back.
fn keeps_king_safe(state: &mut SearchState<'_>, mv: Move) -> bool {
    let mover = state.side_to_move();
    state.make(mv);
    let safe = !king_attacked(state.position(), &state.tables().attacks, mover);
    state.unmake(mv);
    safe
}

#[inline]
fn push_promotions(from: u8, to: u8, out: &mut MoveList) {
    for kind in PieceKind::PROMOTIONS {
        out.push(Move::promotion(from, to, kind));
    }
}

fn pawn_moves(pos: &Position, kind: GenKind, out: &mut MoveList) {
    let us = pos.side_to_move;
    let them = us.other();
    let fwd = us.forward();
    let empty = !pos.occupied();
    let pawns = pos.pieces_of(us, PieceKind::Pawn);
    let (double_rank, last_rank) = match us {
        Color::White => (Bitboard::RANK_3, Bitboard::RANK_8),
        Color::Black => (Bitboard::RANK_6, Bitboard::RANK_1),
    };
    let origin = |to: u8, delta: i8| (to as i8 - delta) as u8;

    let single = pawns.shift(fwd) & empty;
    let double = (single & double_rank).shift(fwd) & empty;
    for to in single & !last_rank {
        out.push(Move::new(origin(to, fwd), to));
    }
    for to in double {
        out.push(Move::new(origin(to, 2 * fwd), to));
    }
    for to in single & last_rank {
        push_promotions(origin(to, fwd), to, out);
    }

    if kind == GenKind::Quiet {
        return;
    }

    let diagonals = [
        (fwd + 1, Bitboard::NOT_FILE_A),
        (fwd - 1, Bitboard::NOT_FILE_H),
    ];
    let enemies = pos.colors[them.idx()];
    for (delta, mask) in diagonals {
        for to in pawns.shift(delta) & mask & enemies {
            let from = origin(to, delta);
            if last_rank.contains(to) {
                push_promotions(from, to, out);
            } else {
                out.push(Move::new(from, to));
            }
        }
    }

    if let Some(ep) = pos.en_passant {
        let victim = origin(ep, fwd);
        let valid = empty.contains(ep) && pos.pieces_of(them, PieceKind::Pawn).contains(victim);
        if valid {
            for (delta, mask) in diagonals {
                if (pawns.shift(delta) & mask).contains(ep) {
                    out.push(Move::en_passant(origin(ep, delta), ep));
                }
            }
        }
    }
}

fn piece_moves(pos: &Position, attacks: &AttackTables, kind: GenKind, out: &mut MoveList) {
    let us = pos.side_to_move;
    let occupied = pos.occupied();
    let targets = match kind {
        GenKind::All => !pos.colors[us.idx()],
        GenKind::Quiet => !occupied,
    };

    for piece in [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ] {
        for from in pos.pieces_of(us, piece) {
            let reach = match piece {
                PieceKind::Knight | PieceKind::King => attacks.leaper(piece, from),
                PieceKind::Bishop => attacks.sliding(SliderAxis::Diagonal, from, occupied),
                PieceKind::Rook => attacks.sliding(SliderAxis::Orthogonal, from, occupied),
                _ => {
                    attacks.sliding(SliderAxis::Diagonal, from, occupied)
                        | attacks.sliding(SliderAxis::Orthogonal, from, occupied)
                }
            };
            for to in reach & targets {
                out.push(Move::new(from, to));
            }
        }
    }
}

/// Castling squares relative to the king's home square:
/// (king side, squares that must be empty, squares that must not be attacked, rook corner).
const CASTLING_LANES: [(bool, &[u8], &[u8], u8); 2] = [
    (true, &[5, 6], &[4, 5, 6], 7),
    (false, &[1, 2, 3], &[2, 3, 4], 0),
];

fn castling_moves(pos: &Position, enemy_attacks: Bitboard, out: &mut MoveList) {
    let us = pos.side_to_move;
    let base = match us {
        Color::White => 0,
        Color::Black => 56,
    };
    if !pos.pieces_of(us, PieceKind::King).contains(base + 4) {
        return;
    }
    let occupied = pos.occupied();
    let rooks = pos.pieces_of(us, PieceKind::Rook);

    for (king_side, gap, safe, corner) in CASTLING_LANES {
        if !pos.castling.has(us, king_side) || !rooks.contains(base + corner) {
            continue;
        }
        let blocked = gap.iter().any(|&f| occupied.contains(base + f));
        let attacked = safe.iter().any(|&f| enemy_attacks.contains(base + f));
        if !blocked && !attacked {
            out.push(Move::castle(us, king_side));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
