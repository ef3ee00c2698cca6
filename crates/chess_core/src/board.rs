use crate::bitboard::Bitboard;
use crate::error::FenError;
use crate::tables::EngineTables;
use crate::types::*;
use crate::zobrist::ZobristKeys;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Mailbox nibble for a vacant square.
const VACANT: u8 = 0x0f;

/// Castling rights as a 4-bit set. Rights are only ever revoked during play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const WHITE_KING: u8 = 0b0001;
    const WHITE_QUEEN: u8 = 0b0010;
    const BLACK_KING: u8 = 0b0100;
    const BLACK_QUEEN: u8 = 0b1000;

    pub fn from_bits(bits: u8) -> Self {
        CastlingRights(bits & 0b1111)
    }

    #[inline(always)]
    pub fn bits(self) -> u8 {
        self.0
    }

    fn flag(color: Color, king_side: bool) -> u8 {
        match (color, king_side) {
            (Color::White, true) => Self::WHITE_KING,
            (Color::White, false) => Self::WHITE_QUEEN,
            (Color::Black, true) => Self::BLACK_KING,
            (Color::Black, false) => Self::BLACK_QUEEN,
        }
    }

    #[inline(always)]
    pub fn has(self, color: Color, king_side: bool) -> bool {
        self.0 & Self::flag(color, king_side) != 0
    }

    pub fn grant(&mut self, color: Color, king_side: bool) {
        self.0 |= Self::flag(color, king_side);
    }

    pub fn revoke_color(&mut self, color: Color) {
        self.0 &= !(Self::flag(color, true) | Self::flag(color, false));
    }

    /// Drop the right tied to a rook's home corner, if `sq` is one.
    pub fn revoke_corner(&mut self, sq: u8) {
        match sq {
            0 => self.0 &= !Self::WHITE_QUEEN,
            7 => self.0 &= !Self::WHITE_KING,
            56 => self.0 &= !Self::BLACK_QUEEN,
            63 => self.0 &= !Self::BLACK_KING,
            _ => {}
        }
    }
}

/// Rook origin and destination for the castling move landing the king on `king_to`.
pub fn castle_rook_squares(king_to: u8) -> Option<(u8, u8)> {
    match king_to {
        2 => Some((0, 3)),
        6 => Some((7, 5)),
        58 => Some((56, 59)),
        62 => Some((63, 61)),
        _ => None,
    }
}

/// One chess position: piece bitboards, a 4-bit-per-square mailbox and the
/// auxiliary state, plus two incrementally maintained hash lanes.
///
/// Positions are plain values. The search stack copies the top entry before
/// applying a move, so nothing here ever has to be undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    /// One set per [`PieceKind`], both colors.
    pub pieces: [Bitboard; 6],
    /// One set per [`Color`], all kinds.
    pub colors: [Bitboard; 2],
    /// Two squares per byte, low nibble first.
    mailbox: [u8; 32],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square behind a pawn that just advanced two squares next to an enemy pawn.
    pub en_passant: Option<u8>,
    pub halfmove_clock: u16,
    /// Pawn placement only.
    pub pawn_hash: u64,
    /// Other pieces, side to move, castling rights, en passant file.
    pub non_pawn_hash: u64,
}

/// A parsed position together with the move number the notation carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedFen {
    pub position: Position,
    pub fullmove_number: u32,
}

impl Position {
    pub const EMPTY: Position = Position {
        pieces: [Bitboard::EMPTY; 6],
        colors: [Bitboard::EMPTY; 2],
        mailbox: [0xff; 32],
        side_to_move: Color::White,
        castling: CastlingRights::NONE,
        en_passant: None,
        halfmove_clock: 0,
        pawn_hash: 0,
        non_pawn_hash: 0,
    };

    /// Parse Forsyth-Edwards Notation. The halfmove and fullmove fields may be
    /// omitted. Nothing is returned unless every field is valid.
    pub fn parse_fen(fen: &str, tables: &EngineTables) -> Result<ParsedFen, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 || parts.len() > 6 {
            return Err(FenError::MissingFields(parts.len()));
        }
        let keys = &tables.zobrist;
        let mut pos = Position::EMPTY;

        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 .. 1
            let mut file: u32 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += d;
                } else {
                    let kind = PieceKind::from_char(ch).ok_or(FenError::PieceChar(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::RankLength {
                            rank: rank + 1,
                            files: file + 1,
                        });
                    }
                    let square = rank * 8 + file as u8;
                    pos.toggle_piece(keys, color, kind, square);
                    pos.set_slot(square, kind);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankLength {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        pos.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };
        if pos.side_to_move == Color::Black {
            pos.non_pawn_hash ^= keys.black_to_move;
        }

        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => pos.castling.grant(Color::White, true),
                    'Q' => pos.castling.grant(Color::White, false),
                    'k' => pos.castling.grant(Color::Black, true),
                    'q' => pos.castling.grant(Color::Black, false),
                    _ => return Err(FenError::CastlingChar(c)),
                }
            }
        }
        pos.non_pawn_hash ^= keys.castling_key(pos.castling);

        if parts[3] != "-" {
            let bad_ep = || FenError::EnPassant(parts[3].to_string());
            let us = pos.side_to_move;
            let target_rank = match us {
                Color::White => 5,
                Color::Black => 2,
            };
            let ep = coord_to_sq(parts[3])
                .filter(|&s| rank_of(s) == target_rank)
                .ok_or_else(bad_ep)?;
            let victim = (ep as i8 - us.forward()) as u8;
            let origin = (ep as i8 + us.forward()) as u8;
            let occupied = pos.occupied();
            let double_pushed = pos.pieces_of(us.other(), PieceKind::Pawn).contains(victim)
                && !occupied.contains(ep)
                && !occupied.contains(origin);
            if !double_pushed {
                return Err(bad_ep());
            }
            // Kept only when a pawn can take, matching what make records.
            let landing = Bitboard::from_square(victim);
            if ((landing.east() | landing.west()) & pos.pieces_of(us, PieceKind::Pawn)).any() {
                pos.en_passant = Some(ep);
                pos.non_pawn_hash ^= keys.ep_key(file_of(ep));
            }
        }

        let halfmove = parts.get(4).copied().unwrap_or("0");
        pos.halfmove_clock = halfmove.parse().map_err(|_| FenError::Clock {
            field: "halfmove",
            value: halfmove.to_string(),
        })?;
        let fullmove = parts.get(5).copied().unwrap_or("1");
        let fullmove_number: u32 = fullmove.parse().map_err(|_| FenError::Clock {
            field: "fullmove",
            value: fullmove.to_string(),
        })?;

        for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
            let count = pos.pieces_of(color, PieceKind::King).popcount();
            if count != 1 {
                return Err(FenError::KingCount { color: name, count });
            }
        }
        let waiting = pos.side_to_move.other();
        if crate::movegen::king_attacked(&pos, &tables.attacks, waiting) {
            return Err(FenError::OpponentInCheck);
        }

        Ok(ParsedFen {
            position: pos,
            fullmove_number,
        })
    }

    /// Parse FEN, discarding the move number.
    pub fn from_fen(fen: &str, tables: &EngineTables) -> Result<Self, FenError> {
        Self::parse_fen(fen, tables).map(|parsed| parsed.position)
    }

    pub fn to_fen(&self, fullmove_number: u32) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(rank * 8 + file) {
                    None => empty += 1,
                    Some(pc) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        let ch = pc.kind.to_char();
                        out.push(match pc.color {
                            Color::White => ch.to_ascii_uppercase(),
                            Color::Black => ch,
                        });
                    }
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let before = out.len();
        for (color, king_side, ch) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling.has(color, king_side) {
                out.push(ch);
            }
        }
        if out.len() == before {
            out.push('-');
        }

        out.push(' ');
        match self.en_passant {
            Some(ep) => out.push_str(&sq_to_coord(ep)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, fullmove_number));
        out
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[inline(always)]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[kind.idx()] & self.colors[color.idx()]
    }

    /// The square of `color`'s king.
    ///
    /// # Panics
    /// If the position does not hold exactly one king of that color.
    #[inline]
    pub fn king_square(&self, color: Color) -> u8 {
        let kings = self.pieces_of(color, PieceKind::King);
        assert!(
            kings.popcount() == 1,
            "{color:?} must have exactly one king, found {}",
            kings.popcount()
        );
        kings.0.trailing_zeros() as u8
    }

    /// Kind on an occupied square, read from the mailbox.
    #[inline(always)]
    pub fn kind_at(&self, sq: u8) -> PieceKind {
        let byte = self.mailbox[(sq / 2) as usize];
        let nibble = if sq % 2 == 0 { byte & 0x0f } else { byte >> 4 };
        match PieceKind::from_index(nibble) {
            Some(kind) => kind,
            None => panic!("mailbox has no piece on square {sq}"),
        }
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        let color = if self.colors[0].contains(sq) {
            Color::White
        } else if self.colors[1].contains(sq) {
            Color::Black
        } else {
            return None;
        };
        Some(Piece {
            color,
            kind: self.kind_at(sq),
        })
    }

    /// Fifty moves by each side without a pawn move or capture.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Both hash lanes recomputed from scratch.
    pub fn compute_hashes(&self, keys: &ZobristKeys) -> (u64, u64) {
        let mut pawn = 0;
        let mut non_pawn = keys.castling_key(self.castling);
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                for sq in self.pieces_of(color, kind) {
                    match kind {
                        PieceKind::Pawn => pawn ^= keys.piece_key(color, kind, sq),
                        _ => non_pawn ^= keys.piece_key(color, kind, sq),
                    }
                }
            }
        }
        if self.side_to_move == Color::Black {
            non_pawn ^= keys.black_to_move;
        }
        if let Some(ep) = self.en_passant {
            non_pawn ^= keys.ep_key(file_of(ep));
        }
        (pawn, non_pawn)
    }

    /// Checks the structural invariants: one king per side, disjoint colors,
    /// kind sets covering exactly the color sets, and a mailbox that agrees
    /// with the bitboards.
    pub fn is_consistent(&self) -> bool {
        let kinds = self.pieces.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb);
        let kinds_disjoint =
            self.pieces.iter().map(|bb| bb.popcount()).sum::<u32>() == kinds.popcount();
        let kings = [Color::White, Color::Black]
            .iter()
            .all(|&c| self.pieces_of(c, PieceKind::King).popcount() == 1);
        let mailbox = self.occupied().all(|sq| {
            let byte = self.mailbox[(sq / 2) as usize];
            let nibble = if sq % 2 == 0 { byte & 0x0f } else { byte >> 4 };
            PieceKind::from_index(nibble).is_some_and(|k| self.pieces[k.idx()].contains(sq))
        });
        kings
            && kinds_disjoint
            && (self.colors[0] & self.colors[1]).is_empty()
            && kinds == self.occupied()
            && mailbox
    }

    /// Apply `mv` in place for the side to move, keeping both hash lanes in
    /// step. Callers copy the position first; there is no inverse.
    pub(crate) fn apply_move(&mut self, mv: Move, keys: &ZobristKeys) {
        let us = self.side_to_move;
        let them = us.other();
        let from = mv.from();
        let to = mv.to();
        let moved = self.kind_at(from);
        let rights_before = self.castling;

        self.halfmove_clock = self.halfmove_clock.saturating_add(1);

        if self.colors[them.idx()].contains(to) {
            let captured = self.kind_at(to);
            self.toggle_piece(keys, them, captured, to);
            if captured == PieceKind::Rook {
                self.castling.revoke_corner(to);
            }
            self.halfmove_clock = 0;
        }

        if let Some(ep) = self.en_passant.take() {
            self.non_pawn_hash ^= keys.ep_key(file_of(ep));
        }

        self.toggle_piece(keys, us, moved, from);
        self.toggle_piece(keys, us, moved, to);
        self.clear_slot(from);
        self.set_slot(to, moved);

        match moved {
            PieceKind::Pawn => {
                self.halfmove_clock = 0;
                self.apply_pawn_special(mv, keys);
            }
            PieceKind::Rook => self.castling.revoke_corner(from),
            PieceKind::King => self.castling.revoke_color(us),
            _ => {}
        }

        if mv.special() == Special::Castling
            && let Some((rook_from, rook_to)) = castle_rook_squares(to)
        {
            self.toggle_piece(keys, us, PieceKind::Rook, rook_from);
            self.toggle_piece(keys, us, PieceKind::Rook, rook_to);
            self.clear_slot(rook_from);
            self.set_slot(rook_to, PieceKind::Rook);
        }

        if self.castling != rights_before {
            self.non_pawn_hash ^= keys.castling_key(rights_before);
            self.non_pawn_hash ^= keys.castling_key(self.castling);
        }

        self.side_to_move = them;
        self.non_pawn_hash ^= keys.black_to_move;
    }

    /// Double push, promotion and en passant follow-ups. The pawn has already
    /// been moved to the destination square.
    fn apply_pawn_special(&mut self, mv: Move, keys: &ZobristKeys) {
        let us = self.side_to_move;
        let them = us.other();
        let from = mv.from();
        let to = mv.to();

        if from ^ to == 16 {
            // Only offer en passant when an enemy pawn could actually take.
            let landing = Bitboard::from_square(to);
            let their_pawns = self.pieces_of(them, PieceKind::Pawn);
            if ((landing.east() | landing.west()) & their_pawns).any() {
                let ep = (from + to) / 2;
                self.en_passant = Some(ep);
                self.non_pawn_hash ^= keys.ep_key(file_of(ep));
            }
            return;
        }

        match mv.special() {
            Special::Promotion => {
                if let Some(kind) = mv.promo() {
                    self.toggle_piece(keys, us, PieceKind::Pawn, to);
                    self.toggle_piece(keys, us, kind, to);
                    self.set_slot(to, kind);
                }
            }
            Special::EnPassant => {
                let victim = (to as i8 - us.forward()) as u8;
                self.toggle_piece(keys, them, PieceKind::Pawn, victim);
                self.clear_slot(victim);
            }
            _ => {}
        }
    }

    /// Flip one piece in its kind and color sets and in the matching hash lane.
    #[inline(always)]
    fn toggle_piece(&mut self, keys: &ZobristKeys, color: Color, kind: PieceKind, sq: u8) {
        let bit = Bitboard::from_square(sq);
        self.pieces[kind.idx()] ^= bit;
        self.colors[color.idx()] ^= bit;
        let key = keys.piece_key(color, kind, sq);
        match kind {
            PieceKind::Pawn => self.pawn_hash ^= key,
            _ => self.non_pawn_hash ^= key,
        }
    }

    #[inline(always)]
    fn set_slot(&mut self, sq: u8, kind: PieceKind) {
        self.write_nibble(sq, kind.idx() as u8);
    }

    #[inline(always)]
    fn clear_slot(&mut self, sq: u8) {
        self.write_nibble(sq, VACANT);
    }

    #[inline(always)]
    fn write_nibble(&mut self, sq: u8, value: u8) {
        let byte = &mut self.mailbox[(sq / 2) as usize];
        if sq % 2 == 0 {
            *byte = (*byte & 0xf0) | value;
        } else {
            *byte = (*byte & 0x0f) | (value << 4);
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
