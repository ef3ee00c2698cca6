use super::*;
use crate::tables::EngineTables;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

fn moves_for(tables: &EngineTables, fen: &str, kind: GenKind) -> MoveList {
    let mut state = SearchState::from_fen(tables, fen).unwrap();
    let mut moves = MoveList::new();
    generate_legal_moves(&mut state, &mut moves, kind);
    moves
}

#[test]
fn test_startpos_moves() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    let mut moves = MoveList::new();
    legal_moves(&mut state, &mut moves);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
    assert_eq!(state.ply(), 0);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let tables = EngineTables::default();
    let moves = moves_for(&tables, KIWIPETE, GenKind::All);
    assert_eq!(moves.len(), 48);
    assert!(moves.contains(&Move::castle(Color::White, true)));
    assert!(moves.contains(&Move::castle(Color::White, false)));
}

#[test]
fn test_quiet_generation_skips_captures() {
    let tables = EngineTables::default();
    // 48 moves, 8 of them captures
    let moves = moves_for(&tables, KIWIPETE, GenKind::Quiet);
    assert_eq!(moves.len(), 40);
    let pos = Position::from_fen(KIWIPETE, &tables).unwrap();
    for mv in moves.iter() {
        assert!(pos.piece_at(mv.to()).is_none(), "{mv} is a capture");
    }
}

#[test]
fn test_generation_is_deterministic() {
    let tables = EngineTables::default();
    let a = moves_for(&tables, KIWIPETE, GenKind::All);
    let b = moves_for(&tables, KIWIPETE, GenKind::All);
    assert_eq!(&a[..], &b[..]);
}

#[test]
fn test_startpos_attack_set() {
    let tables = EngineTables::default();
    let pos = Position::from_fen(crate::board::STARTPOS_FEN, &tables).unwrap();
    let white = attack_set(&pos, &tables.attacks, Color::White);
    assert!((white & Bitboard::RANK_3) == Bitboard::RANK_3);
    assert!((white & Bitboard::RANK_6).is_empty());
    let black = attack_set(&pos, &tables.attacks, Color::Black);
    assert!((black & Bitboard::RANK_6) == Bitboard::RANK_6);
    assert!(!in_check(&pos, &tables.attacks));
}

#[test]
fn test_pawn_attacks_do_not_wrap() {
    let tables = EngineTables::default();
    // White pawn on h4 attacks only g5
    let pos = Position::from_fen("4k3/8/8/8/7P/8/8/4K3 w - - 0 1", &tables).unwrap();
    let set = attack_set(&pos, &tables.attacks, Color::White);
    assert!(set.contains(38)); // g5
    assert!(!set.contains(32)); // a5
    assert!(!set.contains(24)); // a4
}

#[test]
fn test_en_passant_available() {
    let tables = EngineTables::default();
    let moves = moves_for(
        &tables,
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        GenKind::All,
    );
    assert!(moves.contains(&Move::en_passant(36, 45))); // exf6
    assert!(!moves.iter().any(|m| m.to() == 43 && m.from() == 36)); // no exd6
}

#[test]
fn test_en_passant_rank_pin() {
    let tables = EngineTables::default();
    // bxc6 e.p. would leave the king on a5 facing the rook on h5
    let moves = moves_for(&tables, "8/8/8/KPp4r/8/8/8/7k w - c6 0 1", GenKind::All);
    assert!(!moves.contains(&Move::en_passant(33, 42)));
    assert!(moves.contains(&Move::new(33, 41))); // b6 is fine
}

#[test]
fn test_quiet_generation_skips_en_passant() {
    let tables = EngineTables::default();
    let moves = moves_for(
        &tables,
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        GenKind::Quiet,
    );
    assert!(!moves.iter().any(|m| m.special() == Special::EnPassant));
}

#[test]
fn test_promotions() {
    let tables = EngineTables::default();
    let moves = moves_for(&tables, "8/P7/8/8/8/8/8/k6K w - - 0 1", GenKind::All);
    // Four promotions plus three king moves
    assert_eq!(moves.len(), 7);
    for kind in PieceKind::PROMOTIONS {
        assert!(moves.contains(&Move::promotion(48, 56, kind)));
    }
}

#[test]
fn test_capture_promotions_are_not_quiet() {
    let tables = EngineTables::default();
    // a7 can push to a8 or take on b8
    let fen = "1n5k/P7/8/8/8/8/8/7K w - - 0 1";
    let all = moves_for(&tables, fen, GenKind::All);
    let quiet = moves_for(&tables, fen, GenKind::Quiet);
    assert!(all.contains(&Move::promotion(48, 57, PieceKind::Queen)));
    assert!(!quiet.contains(&Move::promotion(48, 57, PieceKind::Queen)));
    assert!(quiet.contains(&Move::promotion(48, 56, PieceKind::Knight)));
}

#[test]
fn test_no_castling_through_attacked_square() {
    let tables = EngineTables::default();
    // Rook on f8 covers f1
    let moves = moves_for(&tables, "4kr2/8/8/8/8/8/8/4K2R w K - 0 1", GenKind::All);
    assert!(!moves.contains(&Move::castle(Color::White, true)));
}

#[test]
fn test_queenside_castling_with_attacked_b_file() {
    let tables = EngineTables::default();
    // b1 is attacked but the king never crosses it
    let moves = moves_for(&tables, "1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", GenKind::All);
    assert!(moves.contains(&Move::castle(Color::White, false)));
}

#[test]
fn test_no_castling_out_of_check() {
    let tables = EngineTables::default();
    let moves = moves_for(&tables, "4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1", GenKind::All);
    assert!(!moves.iter().any(|m| m.special() == Special::Castling));
}

#[test]
fn test_black_castling() {
    let tables = EngineTables::default();
    let moves = moves_for(&tables, "r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1", GenKind::All);
    assert!(moves.contains(&Move::castle(Color::Black, true)));
    assert!(moves.contains(&Move::castle(Color::Black, false)));
}

#[test]
fn test_single_evasion() {
    let tables = EngineTables::default();
    // Queen on e2 checks the king on e1; only Kxe2 remains
    let moves = moves_for(&tables, "4k3/8/8/8/8/8/4q3/4K3 w - - 0 1", GenKind::All);
    assert_eq!(&moves[..], &[Move::new(4, 12)]);
}

#[test]
fn test_pinned_piece_stays_on_line() {
    let tables = EngineTables::default();
    // Bishop on e2 is pinned by the rook on e8
    let moves = moves_for(&tables, "4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1", GenKind::All);
    assert!(!moves.iter().any(|m| m.from() == 12));
}

#[test]
fn test_generated_moves_keep_king_safe() {
    let tables = EngineTables::default();
    for fen in [
        KIWIPETE,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ] {
        let mut state = SearchState::from_fen(&tables, fen).unwrap();
        let mut moves = MoveList::new();
        legal_moves(&mut state, &mut moves);
        let mover = state.side_to_move();
        for &mv in moves.iter() {
            state.make(mv);
            assert!(
                !king_attacked(state.position(), &tables.attacks, mover),
                "{mv} leaves the king attacked in {fen}"
            );
            state.unmake(mv);
        }
    }
}

#[test]
fn test_move_list_swap_remove() {
    let mut list = MoveList::new();
    list.push(Move::new(0, 1));
    list.push(Move::new(0, 2));
    list.push(Move::new(0, 3));
    assert_eq!(list.swap_remove(0), Move::new(0, 1));
    assert_eq!(&list[..], &[Move::new(0, 3), Move::new(0, 2)]);
    list.clear();
    assert!(list.is_empty());
}
