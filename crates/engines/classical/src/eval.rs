//! Static evaluation seam.
//!
//! The search calls an [`Evaluator`] at every leaf. Scores are in pawns and
//! positive when white is better, independent of the side to move.

use chess_core::Position;

/// A pure scoring function of a position.
pub trait Evaluator {
    fn evaluate(&self, pos: &Position) -> i32;
}

/// Material balance: pawn 1, knight and bishop 3, rook 5, queen 9.
#[derive(Debug, Clone, Copy, Default)]
pub struct Material;

impl Evaluator for Material {
    #[inline]
    fn evaluate(&self, pos: &Position) -> i32 {
        chess_core::evaluate(pos)
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> i32,
{
    #[inline]
    fn evaluate(&self, pos: &Position) -> i32 {
        self(pos)
    }
}
