use std::sync::atomic::AtomicBool;

use ember::board::{GameState, Move};
use ember::search::{AlphaBetaSearcher, SearchInfo, SearchLimits, Searcher};

fn search(fen: &str, limits: SearchLimits) -> (f64, Move, Vec<String>) {
    let mut state = GameState::from_fen(fen).unwrap();
    let info = SearchInfo::new();
    let stop = AtomicBool::new(false);
    let mut searcher = AlphaBetaSearcher::new();
    let (score, best) = searcher
        .search(&mut state, &limits, &info, &stop)
        .expect("search should find a move");
    let pv = info.pv().iter().map(ToString::to_string).collect();
    (score, best, pv)
}

#[test]
fn opening_depth_two_is_level_and_symmetric() {
    let limits = SearchLimits {
        max_depth: Some(2),
        ..SearchLimits::default()
    };
    let (score, best, pv) = search(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        limits,
    );

    let best = best.to_string();
    assert!(best == "e2e4" || best == "e2e3", "unexpected opening move {best}");
    assert!(score.abs() < 0.001, "opening should be balanced, got {score}");
    assert_eq!(pv.len(), 2, "PV should hold both plies: {pv:?}");
    assert!(pv[1] == "e7e5" || pv[1] == "e7e6", "unexpected reply {}", pv[1]);
}

#[test]
fn queen_mates_in_two() {
    let limits = SearchLimits {
        mate_in: Some(2),
        ..SearchLimits::default()
    };
    let (score, best, pv) = search("2K5/8/2k5/8/8/8/8/3q4 b - - 0 1", limits);

    assert!(score <= -100.0, "mate for Black should be decisive, got {score}");
    assert_eq!(best.to_string(), "d1d7");
    assert_eq!(pv, ["d1d7", "c8b8", "d7b7"]);
}

#[test]
fn depth_one_still_finds_a_hanging_queen() {
    let limits = SearchLimits {
        max_depth: Some(1),
        ..SearchLimits::default()
    };
    let (score, best, _) = search("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", limits);
    assert_eq!(best.to_string(), "e4d5");
    assert!(score > 0.0, "taking the queen must beat losing the pawn: {score}");
}

#[test]
fn node_limited_search_still_reports_a_move() {
    let limits = SearchLimits {
        max_nodes: Some(500),
        ..SearchLimits::default()
    };
    let mut state = GameState::new();
    let info = SearchInfo::new();
    let stop = AtomicBool::new(false);
    let mut searcher = AlphaBetaSearcher::new();
    let (_, best) = searcher
        .search(&mut state, &limits, &info, &stop)
        .expect("a depth-1 pass fits in 500 nodes");
    assert!(state.generate_moves().contains(&best));
}
