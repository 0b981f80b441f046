//! Piece placement and move execution on a bare board.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::types::{Bitboard, Color, ColoredPiece, Move, Piece, Square};

// Board array layout: one bitboard per colored piece, then the color
// unions, then full occupancy.
const W_ALL: usize = 12;
const B_ALL: usize = 13;
const BOTH_ALL: usize = 14;
const NUM_BOARDS: usize = 15;

/// A layout of pieces with no game-state bookkeeping.
///
/// Holds twelve colored-piece bitboards, the two color unions, the
/// full occupancy, and a square list per colored piece for fast
/// iteration over a piece type. Placement and removal keep all four
/// structures consistent but check no preconditions; misuse corrupts
/// the position.
#[derive(Clone, Debug)]
pub struct Position {
    boards: [Bitboard; NUM_BOARDS],
    squares: [Vec<Square>; 12],
}

impl Position {
    #[must_use]
    pub fn empty() -> Self {
        Position {
            boards: [Bitboard::EMPTY; NUM_BOARDS],
            squares: Default::default(),
        }
    }

    /// The bitboard for one colored piece.
    #[inline]
    #[must_use]
    pub fn pieces(&self, piece: ColoredPiece) -> Bitboard {
        self.boards[piece.index()]
    }

    /// Union of all pieces of one color.
    #[inline]
    #[must_use]
    pub fn color_union(&self, color: Color) -> Bitboard {
        match color {
            Color::White => self.boards[W_ALL],
            Color::Black => self.boards[B_ALL],
        }
    }

    /// Union of both color unions.
    #[inline]
    #[must_use]
    pub fn occupancy(&self) -> Bitboard {
        self.boards[BOTH_ALL]
    }

    /// Squares currently holding the given colored piece.
    #[inline]
    #[must_use]
    pub fn piece_squares(&self, piece: ColoredPiece) -> &[Square] {
        &self.squares[piece.index()]
    }

    /// Whether the given colored piece sits on `sq`.
    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square, piece: ColoredPiece) -> bool {
        self.boards[piece.index()].contains(sq)
    }

    /// Identify the occupant of `sq`, if any.
    #[must_use]
    pub fn occupant(&self, sq: Square) -> Option<ColoredPiece> {
        if !self.boards[BOTH_ALL].contains(sq) {
            return None;
        }
        (0..12)
            .find(|&i| self.boards[i].contains(sq))
            .map(ColoredPiece::from_index)
    }

    /// Put `piece` on `sq`. O(1); does not check that the square is free.
    pub fn place(&mut self, sq: Square, piece: ColoredPiece) {
        let idx = piece.index();
        self.boards[idx].set(sq);
        self.boards[BOTH_ALL].set(sq);
        match piece.color {
            Color::White => self.boards[W_ALL].set(sq),
            Color::Black => self.boards[B_ALL].set(sq),
        }
        self.squares[idx].push(sq);
    }

    /// Take `piece` off `sq`. O(1); does not check that it is there.
    pub fn remove(&mut self, sq: Square, piece: ColoredPiece) {
        let idx = piece.index();
        self.boards[idx].clear(sq);
        self.boards[W_ALL].clear(sq);
        self.boards[B_ALL].clear(sq);
        self.boards[BOTH_ALL].clear(sq);
        if let Some(pos) = self.squares[idx].iter().position(|&s| s == sq) {
            self.squares[idx].swap_remove(pos);
        }
    }

    /// Execute a move on the bare board: captured piece first (the en
    /// passant victim sits one rank behind the destination), then the
    /// mover, promoting if asked, then the rook on castles.
    pub fn apply_move(&mut self, m: Move) {
        let piece = m.piece();
        let (from, to) = (m.from(), m.to());

        if m.is_capture() {
            let captured_sq = if m.is_en_passant() {
                // The captured pawn is behind the destination from the
                // mover's point of view.
                to.offset(-piece.color.pawn_delta())
            } else {
                to
            };
            if let Some(victim) = self.occupant(captured_sq) {
                self.remove(captured_sq, victim);
            }
        }

        self.remove(from, piece);

        match m.promotion_target() {
            Some(kind) => self.place(to, ColoredPiece::new(piece.color, kind)),
            None => self.place(to, piece),
        }

        if m.is_castle_kingside() {
            let rook = ColoredPiece::new(piece.color, Piece::Rook);
            let (rook_from, rook_to) = match piece.color {
                Color::White => (Square::new(0, 7), Square::new(0, 5)), // h1 -> f1
                Color::Black => (Square::new(7, 7), Square::new(7, 5)), // h8 -> f8
            };
            self.remove(rook_from, rook);
            self.place(rook_to, rook);
        } else if m.is_castle_queenside() {
            let rook = ColoredPiece::new(piece.color, Piece::Rook);
            let (rook_from, rook_to) = match piece.color {
                Color::White => (Square::new(0, 0), Square::new(0, 3)), // a1 -> d1
                Color::Black => (Square::new(7, 0), Square::new(7, 3)), // a8 -> d8
            };
            self.remove(rook_from, rook);
            self.place(rook_to, rook);
        }
    }

    /// The board field of a FEN string: ranks 8 down to 1, run-length
    /// encoded, `/`-separated.
    #[must_use]
    pub fn fen_board(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.occupant(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }
}

// Equality and ordering consider the fifteen bitboards only: the
// square lists mirror them exactly, and the repetition map needs a
// total order that ignores castling and en passant state.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.boards == other.boards
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.boards.cmp(&other.boards)
    }
}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.boards.hash(state);
    }
}
