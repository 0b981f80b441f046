//! Piece, color and colored-piece types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess piece kinds.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    /// All piece kinds in index order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    /// Parse a piece from its letter, case-insensitive.
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    /// Lowercase piece letter.
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// Material value in pawns, used by MVV-LVA ordering and evaluation.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Piece::Pawn => 1.0,
            Piece::Knight | Piece::Bishop => 3.0,
            Piece::Rook => 5.0,
            Piece::Queen => 9.0,
            Piece::King => 200.0,
        }
    }
}

/// Side colors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Pawn push direction as a square-index delta.
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_delta(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }

    /// Rank holding this color's unmoved pawns (1 for White, 6 for Black).
    #[inline]
    #[must_use]
    pub(crate) const fn pawn_start_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank a pawn promotes on (7 for White, 0 for Black).
    #[inline]
    #[must_use]
    pub(crate) const fn promotion_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// A (kind, color) pair. There are exactly twelve; the numeric encoding
/// (white 0-5, black 6-11) indexes the position's bitboards and square
/// lists and must stay stable across the crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColoredPiece {
    pub color: Color,
    pub kind: Piece,
}

impl ColoredPiece {
    #[inline]
    #[must_use]
    pub const fn new(color: Color, kind: Piece) -> Self {
        ColoredPiece { color, kind }
    }

    /// Stable numeric encoding: white pieces 0-5, black pieces 6-11,
    /// kind order pawn..king within each color.
    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self.color.index() * 6 + self.kind.index()
    }

    #[inline]
    #[must_use]
    pub(crate) const fn from_index(idx: usize) -> Self {
        let color = if idx < 6 { Color::White } else { Color::Black };
        let kind = match idx % 6 {
            0 => Piece::Pawn,
            1 => Piece::Knight,
            2 => Piece::Bishop,
            3 => Piece::Rook,
            4 => Piece::Queen,
            _ => Piece::King,
        };
        ColoredPiece { color, kind }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    #[inline]
    #[must_use]
    pub fn to_fen_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parse a FEN letter into a colored piece.
    #[must_use]
    pub fn from_fen_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Piece::from_char(c).map(|kind| ColoredPiece { color, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_index_order() {
        for (i, p) in Piece::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn color_opponent_flips() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }

    #[test]
    fn colored_piece_encoding_round_trips() {
        for idx in 0..12 {
            assert_eq!(ColoredPiece::from_index(idx).index(), idx);
        }
        let wp = ColoredPiece::new(Color::White, Piece::Pawn);
        let bk = ColoredPiece::new(Color::Black, Piece::King);
        assert_eq!(wp.index(), 0);
        assert_eq!(bk.index(), 11);
    }

    #[test]
    fn fen_chars() {
        let wq = ColoredPiece::new(Color::White, Piece::Queen);
        let bn = ColoredPiece::new(Color::Black, Piece::Knight);
        assert_eq!(wq.to_fen_char(), 'Q');
        assert_eq!(bn.to_fen_char(), 'n');
        assert_eq!(ColoredPiece::from_fen_char('Q'), Some(wq));
        assert_eq!(ColoredPiece::from_fen_char('n'), Some(bn));
        assert_eq!(ColoredPiece::from_fen_char('x'), None);
    }

    #[test]
    fn piece_values_rank_material() {
        assert!(Piece::Pawn.value() < Piece::Knight.value());
        assert_eq!(Piece::Knight.value(), Piece::Bishop.value());
        assert!(Piece::Rook.value() < Piece::Queen.value());
    }
}
