use std::time::{Duration, Instant};

use super::*;
use crate::{ClassicalEngine, IterationReport, Material, SearchConfig};
use chess_core::{Engine, EngineTables, Position, SearchLimits, parse_move};

const WHITE_MATES_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";
const BLACK_MATES_IN_ONE: &str = "4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1";

fn play(state: &mut SearchState<'_>, moves: &[&str]) {
    for text in moves {
        let mv = parse_move(state, text).unwrap();
        state.make(mv);
    }
}

#[test]
fn test_search_start_position() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    let mut engine = ClassicalEngine::new(SearchConfig::default());
    let result = engine.search(&mut state, &SearchLimits::depth(3));
    assert!(result.best_move.is_some());
    assert_eq!(result.depth, 3);
    assert!(result.nodes > 0);
    assert!(!result.stopped);
    assert_eq!(state.ply(), 0, "search must return the stack to the root");
}

#[test]
fn test_finds_mate_in_one_for_white() {
    let tables = EngineTables::default();
    let mut state = SearchState::from_fen(&tables, WHITE_MATES_IN_ONE).unwrap();
    let mut searcher = Searcher::new(&mut state, &Material, Deadline::none(), 4);
    let scored = searcher.minimax(1, 9, -INFINITY, INFINITY).unwrap();
    assert_eq!(scored.best, Some(Move::new(4, 60)));
    assert_eq!(scored.score, MATE_SCORE - 1);
    assert!(is_mate_score(scored.score));
}

#[test]
fn test_finds_mate_in_one_for_black() {
    let tables = EngineTables::default();
    let mut state = SearchState::from_fen(&tables, BLACK_MATES_IN_ONE).unwrap();
    let mut engine = ClassicalEngine::new(SearchConfig::default());
    let result = engine.search(&mut state, &SearchLimits::depth(2));
    assert_eq!(result.best_move, Some(Move::new(60, 4)));
    assert_eq!(result.score, -(MATE_SCORE - 1));
}

#[test]
fn test_mated_root_scores_mate() {
    let tables = EngineTables::default();
    // Scholar's mate, black to move
    let mut state = SearchState::from_fen(
        &tables,
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
    )
    .unwrap();
    let mut searcher = Searcher::new(&mut state, &Material, Deadline::none(), 4);
    let scored = searcher.minimax(1, 9, -INFINITY, INFINITY).unwrap();
    assert_eq!(scored, Scored { score: MATE_SCORE, best: None });

    let mut engine = ClassicalEngine::new(SearchConfig::default());
    let result = engine.search(&mut state, &SearchLimits::depth(3));
    assert_eq!(result.best_move, None);
}

#[test]
fn test_stalemated_root_scores_zero() {
    let tables = EngineTables::default();
    let mut state = SearchState::from_fen(&tables, "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    let mut searcher = Searcher::new(&mut state, &Material, Deadline::none(), 4);
    let scored = searcher.minimax(2, 10, -INFINITY, INFINITY).unwrap();
    assert_eq!(scored, Scored { score: 0, best: None });
}

#[test]
fn test_expired_deadline_aborts_and_restores_stack() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    let expired = Deadline::after(Instant::now(), Duration::ZERO);
    let mut searcher = Searcher::new(&mut state, &Material, expired, 4);
    assert_eq!(searcher.minimax(3, 11, -INFINITY, INFINITY), None);
    assert_eq!(state.ply(), 0);
}

#[test]
fn test_expired_deadline_falls_back_to_first_legal_move() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    let mut moves = chess_core::MoveList::new();
    chess_core::legal_moves(&mut state, &mut moves);

    let mut engine = ClassicalEngine::new(SearchConfig::default());
    let result = engine.search(&mut state, &SearchLimits::time(Duration::ZERO));
    assert!(result.stopped);
    assert_eq!(result.depth, 0);
    assert_eq!(result.best_move, Some(moves[0]));
}

#[test]
fn test_time_limit_stops_deepening() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    let mut engine = ClassicalEngine::new(SearchConfig::default());
    let start = Instant::now();
    let result = engine.search(&mut state, &SearchLimits::time(Duration::from_millis(200)));
    assert!(result.stopped);
    assert!(result.depth >= 1);
    assert!(result.best_move.is_some());
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_repetition_scores_as_draw() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    play(&mut state, &["g1f3", "g8f6", "f3g1"]);

    // Every non-drawn leaf looks good for white, so black heads for the repetition
    let mut engine = ClassicalEngine::with_evaluator(SearchConfig::default(), |_: &Position| 5);
    let result = engine.search(&mut state, &SearchLimits::depth(1));
    assert_eq!(result.best_move, Some(Move::new(45, 62)));
    assert_eq!(result.score, 0);
    assert_eq!(state.ply(), 3);
}

#[test]
fn test_fifty_move_children_score_as_draw() {
    let tables = EngineTables::default();
    let mut state = SearchState::from_fen(&tables, "8/8/8/4k3/8/4K3/8/4R3 w - - 99 60").unwrap();
    let mut engine = ClassicalEngine::new(SearchConfig::default());
    let result = engine.search(&mut state, &SearchLimits::depth(1));
    assert_eq!(result.score, 0);

    let mut fresh = SearchState::from_fen(&tables, "8/8/8/4k3/8/4K3/8/4R3 w - - 0 60").unwrap();
    let result = engine.search(&mut fresh, &SearchLimits::depth(1));
    assert_eq!(result.score, 5);
}

#[test]
fn test_mate_on_the_hundredth_halfmove_beats_the_draw() {
    let tables = EngineTables::default();
    let mut state =
        SearchState::from_fen(&tables, "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 99 80").unwrap();
    let mut engine = ClassicalEngine::new(SearchConfig::default());
    let result = engine.search(&mut state, &SearchLimits::depth(2));
    assert_eq!(result.best_move, Some(Move::new(4, 60)));
    assert_eq!(result.score, MATE_SCORE - 1);

    let mut black = SearchState::from_fen(&tables, "4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 99 80").unwrap();
    let result = engine.search(&mut black, &SearchLimits::depth(1));
    assert_eq!(result.best_move, Some(Move::new(60, 4)));
    assert_eq!(result.score, -(MATE_SCORE - 1));
}

#[test]
fn test_check_on_the_hundredth_halfmove_is_still_a_draw() {
    let tables = EngineTables::default();
    // Every rook check can be answered, so the clock still draws
    let mut state = SearchState::from_fen(&tables, "8/8/8/4k3/8/4K3/8/4R3 w - - 99 60").unwrap();
    let mut searcher = Searcher::new(&mut state, &Material, Deadline::none(), 4);
    let scored = searcher.minimax(1, 9, -INFINITY, INFINITY).unwrap();
    assert_eq!(scored.score, 0);
    assert_eq!(state.ply(), 0);
}

#[test]
fn test_iterations_are_reported_in_order() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    let mut engine = ClassicalEngine::new(SearchConfig::default());
    let mut reports: Vec<IterationReport> = Vec::new();
    let result = engine.search_with(&mut state, &SearchLimits::depth(3), |r| reports.push(*r));

    let depths: Vec<u8> = reports.iter().map(|r| r.depth).collect();
    assert_eq!(depths, vec![1, 2, 3]);
    assert!(reports.windows(2).all(|w| w[0].nodes <= w[1].nodes));
    let last = reports.last().unwrap();
    assert_eq!(Some(last.best_move), result.best_move);
    assert_eq!(last.nodes, result.nodes);
}

#[test]
fn test_config_caps_depth() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    let config = SearchConfig {
        max_depth: 2,
        ..SearchConfig::default()
    };
    let mut engine = ClassicalEngine::new(config);
    let result = engine.search(&mut state, &SearchLimits::depth(6));
    assert_eq!(result.depth, 2);
}

#[test]
fn test_depth_cap_leaves_room_for_extensions() {
    let engine = ClassicalEngine::new(SearchConfig::default());
    assert_eq!(engine.depth_cap(0), 118);
    assert_eq!(engine.depth_cap(10), 108);
    assert_eq!(engine.depth_cap(200), 0);
}

#[test]
fn test_engine_trait_object() {
    let tables = EngineTables::default();
    let mut state = SearchState::startpos(&tables);
    let mut engine: Box<dyn Engine> = Box::new(ClassicalEngine::new(SearchConfig::default()));
    assert_eq!(engine.name(), "Classical v1.0");
    assert_eq!(engine.author(), "clce");
    assert!(engine.search(&mut state, &SearchLimits::depth(1)).best_move.is_some());
}
