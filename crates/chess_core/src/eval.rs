use crate::{board::Position, types::*};

/// Material balance in pawns, white minus black. Kings count for nothing.
pub fn evaluate(pos: &Position) -> i32 {
    let mut score = 0i32;
    for kind in PieceKind::ALL {
        let white = pos.pieces_of(Color::White, kind).popcount() as i32;
        let black = pos.pieces_of(Color::Black, kind).popcount() as i32;
        score += (white - black) * kind.material();
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
