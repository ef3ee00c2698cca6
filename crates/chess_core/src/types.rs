//! Colors, piece kinds, square helpers and the packed 16-bit move.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Square delta of a single pawn push.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion targets in generation order.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    #[inline(always)]
    pub fn idx(self) -> usize {
        self as usize
    }

    /// Inverse of `idx`; `None` for anything outside 0..6.
    #[inline(always)]
    pub fn from_index(index: u8) -> Option<PieceKind> {
        PieceKind::ALL.get(index as usize).copied()
    }

    /// Material value in pawns. The king carries no material.
    pub fn material(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    /// Lowercase letter used by FEN and move text.
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

/// Special-move kind stored in bits 12-13 of a [`Move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Special {
    None = 0,
    Promotion = 1,
    EnPassant = 2,
    Castling = 3,
}

/// A move packed into 16 bits:
///
/// | bits  | field                                   |
/// |-------|-----------------------------------------|
/// | 0-5   | destination square                      |
/// | 6-11  | origin square                           |
/// | 12-13 | [`Special`] kind                        |
/// | 14-15 | promotion kind (knight, bishop, rook, queen) |
///
/// Only the builders below create moves, and each checks its arguments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// All-zero move (a1a1). Never produced by the generator.
    pub const NULL: Move = Move(0);

    #[inline(always)]
    pub fn new(from: u8, to: u8) -> Self {
        assert!(from < 64 && to < 64, "square out of range: {from} -> {to}");
        Move(to as u16 | (from as u16) << 6)
    }

    #[inline(always)]
    pub fn promotion(from: u8, to: u8, kind: PieceKind) -> Self {
        let white = rank_of(from) == 6 && rank_of(to) == 7;
        let black = rank_of(from) == 1 && rank_of(to) == 0;
        assert!(white || black, "promotion from {from} to {to} is not a back-rank push");
        let code = match kind {
            PieceKind::Knight => 0,
            PieceKind::Bishop => 1,
            PieceKind::Rook => 2,
            PieceKind::Queen => 3,
            _ => panic!("cannot promote to {kind:?}"),
        };
        Move(Self::new(from, to).0 | (Special::Promotion as u16) << 12 | code << 14)
    }

    #[inline(always)]
    pub fn en_passant(from: u8, to: u8) -> Self {
        Move(Self::new(from, to).0 | (Special::EnPassant as u16) << 12)
    }

    /// Castling is fully determined by the mover and the wing.
    pub fn castle(color: Color, king_side: bool) -> Self {
        let from = match color {
            Color::White => 4,
            Color::Black => 60,
        };
        let to = if king_side { from + 2 } else { from - 2 };
        Move(Self::new(from, to).0 | (Special::Castling as u16) << 12)
    }

    #[inline(always)]
    pub const fn to(self) -> u8 {
        (self.0 & 0x3f) as u8
    }

    #[inline(always)]
    pub const fn from(self) -> u8 {
        ((self.0 >> 6) & 0x3f) as u8
    }

    #[inline(always)]
    pub const fn special(self) -> Special {
        match (self.0 >> 12) & 0x03 {
            0 => Special::None,
            1 => Special::Promotion,
            2 => Special::EnPassant,
            _ => Special::Castling,
        }
    }

    /// Promotion kind, only meaningful for [`Special::Promotion`].
    #[inline(always)]
    pub fn promo(self) -> Option<PieceKind> {
        if self.special() != Special::Promotion {
            return None;
        }
        Some(PieceKind::PROMOTIONS[(self.0 >> 14) as usize])
    }

    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Square-pair notation plus a promotion letter, e.g. `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sq_to_coord(self.from()), sq_to_coord(self.to()))?;
        if let Some(kind) = self.promo() {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

// Helpers
pub fn file_of(sq: u8) -> u8 {
    sq % 8
}
pub fn rank_of(sq: u8) -> u8 {
    sq / 8
}

pub fn sq_to_coord(sq: u8) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'1' + (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let file = f - b'a';
    let rank = r - b'1';
    Some(rank * 8 + file)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
