use ember::board::GameState;
use ember::perft::perft;

fn assert_perft(fen: &str, expected: &[u64]) {
    let mut state = GameState::from_fen(fen).unwrap();
    for (i, &nodes) in expected.iter().enumerate() {
        let depth = i + 1;
        assert_eq!(
            perft(&mut state, depth),
            nodes,
            "perft({depth}) mismatch for {fen}"
        );
    }
}

#[test]
fn perft_initial_position() {
    assert_perft(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8_902, 197_281],
    );
}

#[test]
fn perft_kiwipete() {
    assert_perft(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2_039, 97_862],
    );
}

#[test]
fn perft_rook_endgame() {
    assert_perft("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", &[14, 191, 2_812, 43_238]);
}

#[test]
fn perft_promotion_tangle() {
    assert_perft(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        &[44, 1_486, 62_379, 2_103_487],
    );
}

#[test]
fn perft_round_trips_the_state() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut state = GameState::from_fen(fen).unwrap();
    let before = state.clone();
    perft(&mut state, 3);
    assert_eq!(state, before, "make/undo must restore the full state");
    assert_eq!(state.fen(), fen);
}
