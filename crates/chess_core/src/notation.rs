//! Square-pair move text.
//!
//! Formatting lives on [`Move`]'s `Display`. Parsing matches the text against
//! the legal moves of a position, so castling and en passant come back with
//! their special-kind bits set.

use crate::error::MoveParseError;
use crate::movegen::{MoveList, legal_moves};
use crate::state::SearchState;
use crate::types::*;

/// Resolve text such as `e2e4` or `a7a8q` to a legal move of the top position.
pub fn parse_move(state: &mut SearchState<'_>, text: &str) -> Result<Move, MoveParseError> {
    let malformed = || MoveParseError::Malformed(text.to_string());
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(malformed());
    }
    let from = coord_to_sq(&text[0..2]).ok_or_else(malformed)?;
    let to = coord_to_sq(&text[2..4]).ok_or_else(malformed)?;
    let promo = match text[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_char(c) {
            Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => Some(kind),
            _ => return Err(malformed()),
        },
    };

    let mut moves = MoveList::new();
    legal_moves(state, &mut moves);
    moves
        .iter()
        .copied()
        .find(|m| m.from() == from && m.to() == to && m.promo() == promo)
        .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
