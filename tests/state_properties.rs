use ember::board::GameState;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Play random legal games, checking the core invariants at every
    /// step, then unwind and require the exact starting state back.
    #[test]
    fn random_games_round_trip(
        indices in prop::collection::vec(any::<prop::sample::Index>(), 0..40)
    ) {
        let mut state = GameState::new();
        let initial = state.clone();
        let mut made = 0;

        for idx in indices {
            let moves = state.generate_moves();
            if moves.is_empty() {
                break;
            }
            let mover = state.side_to_move();
            let m = moves[idx.index(moves.len())];
            state.make_move(m);
            made += 1;

            prop_assert!(
                !state.pos().in_check(mover),
                "legal move {} left the mover in check",
                m
            );

            let fen = state.fen();
            let reparsed = GameState::from_fen(&fen).unwrap();
            prop_assert_eq!(reparsed.fen(), fen, "FEN round trip drifted");
        }

        for _ in 0..made {
            state.undo_move();
        }
        prop_assert_eq!(state, initial);
    }

    /// No legal moves means checkmate or stalemate, never both, and
    /// having moves means neither.
    #[test]
    fn move_absence_matches_mate_classification(
        indices in prop::collection::vec(any::<prop::sample::Index>(), 0..60)
    ) {
        let mut state = GameState::new();
        for idx in indices {
            let moves = state.generate_moves();
            if moves.is_empty() {
                prop_assert!(state.is_checkmate() != state.is_stalemate());
                break;
            }
            prop_assert!(!state.is_checkmate() && !state.is_stalemate());
            let m = moves[idx.index(moves.len())];
            state.make_move(m);
        }
    }
}
