use crate::movegen::{GenKind, MoveList, generate_legal_moves};
use crate::state::SearchState;
use crate::types::Move;

/// Pure perft node count.
/// Counts all positions reachable from the top of `state` in exactly `depth`
/// plies, generating only moves of `kind` at every ply.
pub fn perft(state: &mut SearchState<'_>, depth: u8, kind: GenKind) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    generate_legal_moves(state, &mut moves, kind);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &mv in moves.iter() {
        state.make(mv);
        nodes += perft(state, depth - 1, kind);
        state.unmake(mv);
    }
    nodes
}

/// Subtree counts per root move, in generation order.
pub fn perft_divide(state: &mut SearchState<'_>, depth: u8, kind: GenKind) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut moves = MoveList::new();
    generate_legal_moves(state, &mut moves, kind);
    moves
        .iter()
        .map(|&mv| {
            state.make(mv);
            let nodes = perft(state, depth - 1, kind);
            state.unmake(mv);
            (mv, nodes)
        })
        .collect()
}
