//! Full game state: position plus clocks, rights, repetition and history.

use std::collections::BTreeMap;

use super::position::Position;
use super::types::{Bitboard, Color, ColoredPiece, Move, Piece, Square};

pub(crate) const CASTLE_WHITE_K: u8 = 0b0001;
pub(crate) const CASTLE_WHITE_Q: u8 = 0b0010;
pub(crate) const CASTLE_BLACK_K: u8 = 0b0100;
pub(crate) const CASTLE_BLACK_Q: u8 = 0b1000;

// Squares the king passes through when castling, own square included.
const WHITE_KINGSIDE_PATH: Bitboard = Bitboard(0x70); // e1 f1 g1
const WHITE_QUEENSIDE_PATH: Bitboard = Bitboard(0x1C); // c1 d1 e1
const BLACK_KINGSIDE_PATH: Bitboard = Bitboard(0x70 << 56); // e8 f8 g8
const BLACK_QUEENSIDE_PATH: Bitboard = Bitboard(0x1C << 56); // c8 d8 e8

/// The cheaply-copied snapshot that the undo stack stores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct StateNode {
    pub(crate) position: Position,
    pub(crate) white_to_move: bool,
    pub(crate) castling_rights: u8,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

/// A position together with everything else the rules need: side to
/// move, castling rights, en passant target, the halfmove clock and
/// move counter, a repetition count per visited position, and the
/// snapshot stack that `undo_move` pops.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) node: StateNode,
    repetitions: BTreeMap<Position, u32>,
    history: Vec<StateNode>,
}

impl GameState {
    /// The standard initial position.
    #[must_use]
    pub fn new() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            position.place(Square::new(0, file), ColoredPiece::new(Color::White, kind));
            position.place(
                Square::new(1, file),
                ColoredPiece::new(Color::White, Piece::Pawn),
            );
            position.place(
                Square::new(6, file),
                ColoredPiece::new(Color::Black, Piece::Pawn),
            );
            position.place(Square::new(7, file), ColoredPiece::new(Color::Black, kind));
        }

        GameState::from_parts(position, true, 0b1111, None, 0, 1)
    }

    pub(crate) fn from_parts(
        position: Position,
        white_to_move: bool,
        castling_rights: u8,
        en_passant_target: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        GameState {
            node: StateNode {
                position,
                white_to_move,
                castling_rights,
                en_passant_target,
                halfmove_clock,
                fullmove_number,
            },
            repetitions: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn pos(&self) -> &Position {
        &self.node.position
    }

    #[inline]
    #[must_use]
    pub fn whites_move(&self) -> bool {
        self.node.white_to_move
    }

    /// The color to move.
    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.node.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Whether an en passant capture is available.
    #[inline]
    #[must_use]
    pub fn en_passant(&self) -> bool {
        self.node.en_passant_target.is_some()
    }

    /// The en passant destination square, when one exists.
    #[inline]
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.node.en_passant_target
    }

    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.node.halfmove_clock
    }

    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.node.fullmove_number
    }

    /// How many times the current position has occurred since this
    /// state was constructed.
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&self.node.position)
            .copied()
            .unwrap_or(0)
    }

    /// Threefold repetition, judged on piece placement alone.
    #[must_use]
    pub fn is_draw_by_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Squares the king of the side to move crosses castling kingside
    /// (own square included), or empty if the right is gone.
    #[must_use]
    pub fn castle_through_kingside(&self) -> Bitboard {
        if self.node.white_to_move {
            if self.node.castling_rights & CASTLE_WHITE_K != 0 {
                WHITE_KINGSIDE_PATH
            } else {
                Bitboard::EMPTY
            }
        } else if self.node.castling_rights & CASTLE_BLACK_K != 0 {
            BLACK_KINGSIDE_PATH
        } else {
            Bitboard::EMPTY
        }
    }

    /// Queenside counterpart of `castle_through_kingside`.
    #[must_use]
    pub fn castle_through_queenside(&self) -> Bitboard {
        if self.node.white_to_move {
            if self.node.castling_rights & CASTLE_WHITE_Q != 0 {
                WHITE_QUEENSIDE_PATH
            } else {
                Bitboard::EMPTY
            }
        } else if self.node.castling_rights & CASTLE_BLACK_Q != 0 {
            BLACK_QUEENSIDE_PATH
        } else {
            Bitboard::EMPTY
        }
    }

    /// Make a move: snapshot the current node, apply the move to the
    /// position, refresh rights/clocks, bump the repetition count of
    /// the new position, and hand the turn over.
    pub fn make_move(&mut self, m: Move) {
        self.history.push(self.node.clone());

        self.node.position.apply_move(m);

        let piece = m.piece();
        match piece.kind {
            Piece::King => match piece.color {
                Color::White => {
                    self.node.castling_rights &= !(CASTLE_WHITE_K | CASTLE_WHITE_Q);
                }
                Color::Black => {
                    self.node.castling_rights &= !(CASTLE_BLACK_K | CASTLE_BLACK_Q);
                }
            },
            Piece::Rook => {
                let lost = match (piece.color, m.from().index()) {
                    (Color::White, 0) => CASTLE_WHITE_Q,  // a1
                    (Color::White, 7) => CASTLE_WHITE_K,  // h1
                    (Color::Black, 56) => CASTLE_BLACK_Q, // a8
                    (Color::Black, 63) => CASTLE_BLACK_K, // h8
                    _ => 0,
                };
                self.node.castling_rights &= !lost;
            }
            _ => {}
        }

        self.node.en_passant_target = if m.is_double_pawn_push() {
            Some(m.to().offset(-piece.color.pawn_delta()))
        } else {
            None
        };

        if piece.kind == Piece::Pawn || m.is_capture() {
            self.node.halfmove_clock = 0;
        } else {
            self.node.halfmove_clock += 1;
        }

        if !self.node.white_to_move {
            self.node.fullmove_number += 1;
        }

        *self
            .repetitions
            .entry(self.node.position.clone())
            .or_insert(0) += 1;

        self.node.white_to_move = !self.node.white_to_move;
    }

    /// Undo the most recent move. Calling this with no history is a
    /// programmer error.
    pub fn undo_move(&mut self) {
        if let Some(count) = self.repetitions.get_mut(&self.node.position) {
            *count -= 1;
            if *count == 0 {
                self.repetitions.remove(&self.node.position);
            }
        }
        self.node = self
            .history
            .pop()
            .expect("undo_move called with empty history");
    }

    /// Hand the turn to the other side without touching anything else.
    /// Used by the evaluator's mobility term.
    pub fn flip_move(&mut self) {
        self.node.white_to_move = !self.node.white_to_move;
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
