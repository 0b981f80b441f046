//! Position evaluation.

use crate::board::{Color, ColoredPiece, GameState, Piece};

/// Maps a game state to a score in pawns, positive favouring White.
///
/// Evaluators may keep internal state; `initialize` runs once before a
/// search uses the evaluator. Checkmate is not an evaluator concern,
/// the search substitutes its own mate scores.
pub trait Evaluator {
    fn initialize(&mut self, _state: &mut GameState) {}

    fn evaluate(&mut self, state: &mut GameState) -> f64;
}

const MOBILITY_WEIGHT: f64 = 0.1;
const BISHOP_PAIR_BONUS: f64 = 0.5;
const PAWN_STRUCTURE_PENALTY: f64 = 0.5;

/// Material, mobility, bishop pair and pawn structure.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    fn count(state: &GameState, color: Color, kind: Piece) -> f64 {
        state
            .pos()
            .piece_squares(ColoredPiece::new(color, kind))
            .len() as f64
    }

    fn material(state: &GameState) -> f64 {
        [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
            .iter()
            .map(|&kind| {
                kind.value()
                    * (Self::count(state, Color::White, kind)
                        - Self::count(state, Color::Black, kind))
            })
            .sum()
    }

    /// Legal-move difference, computed by generating for the side to
    /// move, flipping the turn, and generating for the opponent.
    fn mobility(state: &mut GameState) -> f64 {
        let to_move = state.generate_moves().len() as f64;
        state.flip_move();
        let other = state.generate_moves().len() as f64;
        state.flip_move();

        let (white, black) = if state.whites_move() {
            (to_move, other)
        } else {
            (other, to_move)
        };
        MOBILITY_WEIGHT * (white - black)
    }

    fn bishop_pair(state: &GameState) -> f64 {
        let pair = |color| {
            if Self::count(state, color, Piece::Bishop) == 2.0 {
                1.0
            } else {
                0.0
            }
        };
        BISHOP_PAIR_BONUS * (pair(Color::White) - pair(Color::Black))
    }

    /// Penalize doubled and isolated pawns, once per afflicted file.
    fn pawn_structure(state: &GameState) -> f64 {
        let files = |color| {
            let mut counts = [0u32; 8];
            for &sq in state
                .pos()
                .piece_squares(ColoredPiece::new(color, Piece::Pawn))
            {
                counts[sq.file()] += 1;
            }
            counts
        };
        let white = files(Color::White);
        let black = files(Color::Black);

        let mut score = 0.0;
        for file in 0..8 {
            if white[file] >= 2 {
                score -= PAWN_STRUCTURE_PENALTY;
            }
            if black[file] >= 2 {
                score += PAWN_STRUCTURE_PENALTY;
            }

            let isolated = |counts: &[u32; 8]| {
                counts[file] >= 1
                    && (file == 0 || counts[file - 1] == 0)
                    && (file == 7 || counts[file + 1] == 0)
            };
            if isolated(&white) {
                score -= PAWN_STRUCTURE_PENALTY;
            }
            if isolated(&black) {
                score += PAWN_STRUCTURE_PENALTY;
            }
        }
        score
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&mut self, state: &mut GameState) -> f64 {
        Self::material(state)
            + Self::mobility(state)
            + Self::bishop_pair(state)
            + Self::pawn_structure(state)
    }
}
