//! Board representation: types, attack tables, position and game state.

pub mod attack_tables;
mod error;
mod fen;
mod movegen;
mod position;
mod state;
mod types;

pub use error::{FenError, MoveParseError, SquareError};
pub use position::Position;
pub use state::GameState;
pub use types::{Bitboard, BitboardIter, Color, ColoredPiece, Move, MoveList, Piece, Square};
