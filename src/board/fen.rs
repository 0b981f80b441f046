//! FEN serialization and long-algebraic move parsing.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::position::Position;
use super::state::{
    GameState, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
};
use super::types::{ColoredPiece, Move, Piece, Square};

impl GameState {
    /// Parse a six-field FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let position = parse_board(fields[0])?;

        let white_to_move = match fields[1] {
            "w" => true,
            "b" => false,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling_rights = 0u8;
        if fields[2] != "-" {
            for c in fields[2].chars() {
                castling_rights |= match c {
                    'K' => CASTLE_WHITE_K,
                    'Q' => CASTLE_WHITE_Q,
                    'k' => CASTLE_BLACK_K,
                    'q' => CASTLE_BLACK_Q,
                    _ => return Err(FenError::InvalidCastling { castling: c }),
                };
            }
        }

        let en_passant_target = if fields[3] == "-" {
            None
        } else {
            Some(
                fields[3]
                    .parse::<Square>()
                    .map_err(|_| FenError::InvalidEnPassant {
                        found: fields[3].to_string(),
                    })?,
            )
        };

        let halfmove_clock = fields[4].parse().map_err(|_| FenError::InvalidCounter {
            found: fields[4].to_string(),
        })?;
        let fullmove_number = fields[5].parse().map_err(|_| FenError::InvalidCounter {
            found: fields[5].to_string(),
        })?;

        Ok(GameState::from_parts(
            position,
            white_to_move,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
        ))
    }

    /// Emit the six-field FEN for the current state.
    #[must_use]
    pub fn fen(&self) -> String {
        let side = if self.whites_move() { "w" } else { "b" };

        let mut castling = String::new();
        if self.node.castling_rights & CASTLE_WHITE_K != 0 {
            castling.push('K');
        }
        if self.node.castling_rights & CASTLE_WHITE_Q != 0 {
            castling.push('Q');
        }
        if self.node.castling_rights & CASTLE_BLACK_K != 0 {
            castling.push('k');
        }
        if self.node.castling_rights & CASTLE_BLACK_Q != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant_target()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            self.pos().fen_board(),
            side,
            castling,
            en_passant,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }

    /// Parse a move in long-algebraic notation (`e2e4`, `e7e8q`) and
    /// resolve it against the legal moves of the current position.
    pub fn parse_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = uci.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveParseError::InvalidLength { len: chars.len() });
        }

        let square_at = |file: char, rank: char| -> Option<Square> {
            if ('a'..='h').contains(&file) && ('1'..='8').contains(&rank) {
                Some(Square::new(
                    rank as usize - '1' as usize,
                    file as usize - 'a' as usize,
                ))
            } else {
                None
            }
        };
        let (Some(from), Some(to)) = (
            square_at(chars[0], chars[1]),
            square_at(chars[2], chars[3]),
        ) else {
            return Err(MoveParseError::InvalidSquare {
                notation: uci.to_string(),
            });
        };

        let promotion = if chars.len() == 5 {
            match Piece::from_char(chars[4]) {
                Some(p) if !matches!(p, Piece::Pawn | Piece::King) => Some(p),
                _ => {
                    return Err(MoveParseError::InvalidPromotion {
                        promotion: chars[4],
                    })
                }
            }
        } else {
            None
        };

        self.generate_moves()
            .into_iter()
            .find(|m| m.from() == from && m.to() == to && m.promotion_target() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Parse and immediately make a long-algebraic move.
    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let m = self.parse_move(uci)?;
        self.make_move(m);
        Ok(m)
    }
}

fn parse_board(board: &str) -> Result<Position, FenError> {
    let mut position = Position::empty();
    let ranks: Vec<&str> = board.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRank {
            rank_field: board.to_string(),
        });
    }

    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
            } else {
                let piece =
                    ColoredPiece::from_fen_char(c).ok_or(FenError::InvalidPiece { piece: c })?;
                if file >= 8 {
                    return Err(FenError::InvalidRank {
                        rank_field: (*rank_str).to_string(),
                    });
                }
                position.place(Square::new(rank, file), piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::InvalidRank {
                rank_field: (*rank_str).to_string(),
            });
        }
    }

    Ok(position)
}

impl FromStr for GameState {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameState::from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn startpos_round_trips() {
        let gs = GameState::from_fen(STARTPOS).unwrap();
        assert_eq!(gs.fen(), STARTPOS);
        assert_eq!(gs, GameState::new());
    }

    #[test]
    fn fen_round_trip_is_idempotent() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "2K5/8/2k5/8/8/8/8/3q4 b - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 42 99",
        ];
        for fen in fens {
            let gs = GameState::from_fen(fen).unwrap();
            assert_eq!(gs.fen(), fen);
            let again = GameState::from_fen(&gs.fen()).unwrap();
            assert_eq!(again.fen(), fen);
        }
    }

    #[test]
    fn fen_states_round_trip_after_moves() {
        let mut gs = GameState::new();
        for uci in ["e2e4", "c7c5", "g1f3", "d7d6", "f1b5", "c8d7", "e1g1"] {
            gs.make_move_uci(uci).unwrap();
        }
        let emitted = gs.fen();
        assert_eq!(GameState::from_fen(&emitted).unwrap().fen(), emitted);
    }

    #[test]
    fn rejects_malformed_fens() {
        assert!(matches!(
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenError::WrongFieldCount { .. })
        ));
        assert!(matches!(
            GameState::from_fen("rnbqkbnr/ppxppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiece { .. })
        ));
        assert!(matches!(
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::InvalidSideToMove { .. })
        ));
        assert!(matches!(
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1"),
            Err(FenError::InvalidCastling { .. })
        ));
        assert!(matches!(
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
            Err(FenError::InvalidEnPassant { .. })
        ));
        assert!(matches!(
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1"),
            Err(FenError::InvalidCounter { .. })
        ));
        assert!(matches!(
            GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::WrongFieldCount { .. })
        ));
    }

    #[test]
    fn parse_move_resolves_promotions() {
        let gs = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let m = gs.parse_move("a7a8q").unwrap();
        assert_eq!(m.promotion_target(), Some(Piece::Queen));
        let m = gs.parse_move("a7a8n").unwrap();
        assert_eq!(m.promotion_target(), Some(Piece::Knight));
    }

    #[test]
    fn parse_move_rejects_bad_input() {
        let gs = GameState::new();
        assert!(matches!(
            gs.parse_move("e2"),
            Err(MoveParseError::InvalidLength { .. })
        ));
        assert!(matches!(
            gs.parse_move("z9e4"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            gs.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
        let gs = GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(matches!(
            gs.parse_move("a7a8k"),
            Err(MoveParseError::InvalidPromotion { .. })
        ));
    }

    #[test]
    fn from_str_parses_fen() {
        let gs: GameState = STARTPOS.parse().unwrap();
        assert!(gs.whites_move());
    }
}
