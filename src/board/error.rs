//! Error types for board parsing.

use std::fmt;

/// Failure while parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN needs six whitespace-separated fields.
    WrongFieldCount { found: usize },
    /// Unknown piece letter in the board field.
    InvalidPiece { piece: char },
    /// A rank is missing or describes more than eight files.
    InvalidRank { rank_field: String },
    /// Side-to-move field was not `w` or `b`.
    InvalidSideToMove { found: String },
    /// Castling field contained something outside `KQkq-`.
    InvalidCastling { castling: char },
    /// En passant field was neither `-` nor a square.
    InvalidEnPassant { found: String },
    /// Halfmove or fullmove counter did not parse as a number.
    InvalidCounter { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "FEN must have 6 fields, found {found}")
            }
            FenError::InvalidPiece { piece } => {
                write!(f, "invalid piece character '{piece}' in FEN board")
            }
            FenError::InvalidRank { rank_field } => {
                write!(f, "invalid FEN rank '{rank_field}'")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidCastling { castling } => {
                write!(f, "invalid castling character '{castling}'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::InvalidCounter { found } => {
                write!(f, "invalid move counter '{found}'")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Failure while parsing a long-algebraic move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Moves are four or five characters.
    InvalidLength { len: usize },
    /// A square token was outside a1-h8.
    InvalidSquare { notation: String },
    /// The promotion letter was not one of n, b, r, q.
    InvalidPromotion { promotion: char },
    /// The move parsed but is not legal in the current position.
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square in move '{notation}'")
            }
            MoveParseError::InvalidPromotion { promotion } => {
                write!(f, "invalid promotion piece '{promotion}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Failure while parsing algebraic square notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    RankOutOfBounds { rank: usize },
    FileOutOfBounds { file: usize },
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::RankOutOfBounds { rank } => {
                write!(f, "rank {rank} out of bounds (must be 0-7)")
            }
            SquareError::FileOutOfBounds { file } => {
                write!(f, "file {file} out of bounds (must be 0-7)")
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_errors_name_the_offending_token() {
        let err = FenError::InvalidPiece { piece: 'z' };
        assert!(err.to_string().contains("'z'"));
        let err = FenError::InvalidEnPassant {
            found: "z9".to_string(),
        };
        assert!(err.to_string().contains("z9"));
        let err = FenError::WrongFieldCount { found: 3 };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn move_errors_name_the_offending_token() {
        let err = MoveParseError::IllegalMove {
            notation: "e2e5".to_string(),
        };
        assert!(err.to_string().contains("e2e5"));
        let err = MoveParseError::InvalidPromotion { promotion: 'k' };
        assert!(err.to_string().contains("'k'"));
    }

    #[test]
    fn square_errors_display() {
        let err = SquareError::InvalidNotation {
            notation: "m0".to_string(),
        };
        assert!(err.to_string().contains("m0"));
    }
}
