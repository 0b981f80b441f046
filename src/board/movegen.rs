//! Attack queries and legal move generation.

use super::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use super::position::Position;
use super::state::GameState;
use super::types::{Bitboard, Color, ColoredPiece, Move, MoveList, Piece, Square, PROMOTION_PIECES};

impl Position {
    /// The king square for `color`, or `None` on a malformed board.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.piece_squares(ColoredPiece::new(color, Piece::King))
            .first()
            .copied()
    }

    /// Enemy pieces of `victim_color`'s opponent that attack `square`
    /// under the supplied occupancy.
    #[must_use]
    pub fn attacks_to(&self, square: Square, victim_color: Color, occupancy: u64) -> Bitboard {
        let enemy = victim_color.opponent();
        let knights = self.pieces(ColoredPiece::new(enemy, Piece::Knight)).0;
        let kings = self.pieces(ColoredPiece::new(enemy, Piece::King)).0;
        let bishops = self.pieces(ColoredPiece::new(enemy, Piece::Bishop)).0;
        let rooks = self.pieces(ColoredPiece::new(enemy, Piece::Rook)).0;
        let queens = self.pieces(ColoredPiece::new(enemy, Piece::Queen)).0;
        let pawns = self.pieces(ColoredPiece::new(enemy, Piece::Pawn)).0;

        let mut attackers = knight_attacks(square) & knights;
        attackers |= king_attacks(square) & kings;
        attackers |= bishop_attacks(square, occupancy) & (bishops | queens);
        attackers |= rook_attacks(square, occupancy) & (rooks | queens);
        // The squares a pawn of the victim's color would attack are
        // exactly the squares an enemy pawn attacks the victim from.
        attackers |= pawn_attacks(victim_color, square) & pawns;
        Bitboard(attackers)
    }

    /// Whether `color`'s king is attacked.
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => !self.attacks_to(king, color, self.occupancy().0).is_empty(),
            None => false,
        }
    }
}

impl GameState {
    /// All legal moves for the side to move.
    ///
    /// Pseudo-legal moves are generated first, then each is applied to
    /// a copy of the bare position and dropped if it leaves the mover
    /// in check. The state itself is never modified.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let us = self.side_to_move();
        self.generate_pseudo_legal()
            .into_iter()
            .filter(|&m| {
                let mut position = self.pos().clone();
                position.apply_move(m);
                !position.in_check(us)
            })
            .collect()
    }

    /// Whether the side to move is checkmated.
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.pos().in_check(self.side_to_move()) && self.generate_moves().is_empty()
    }

    /// Whether the side to move is stalemated.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.pos().in_check(self.side_to_move()) && self.generate_moves().is_empty()
    }

    fn generate_pseudo_legal(&self) -> MoveList {
        let mut moves = MoveList::new();
        self.king_moves(&mut moves);
        self.castling_moves(&mut moves);
        self.en_passant_moves(&mut moves);
        self.pawn_moves(&mut moves);
        self.knight_moves(&mut moves);
        self.slider_moves(&mut moves);
        moves
    }

    fn emit_to_squares(
        &self,
        from: Square,
        targets: u64,
        piece: ColoredPiece,
        moves: &mut MoveList,
    ) {
        let enemy = self.pos().color_union(piece.color.opponent());
        for to in Bitboard(targets).iter() {
            if enemy.contains(to) {
                moves.push(Move::capture(from, to, piece));
            } else {
                moves.push(Move::quiet(from, to, piece));
            }
        }
    }

    fn king_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move();
        let king = ColoredPiece::new(us, Piece::King);
        let Some(from) = self.pos().king_square(us) else {
            return;
        };
        let targets = king_attacks(from) & !self.pos().color_union(us).0;
        self.emit_to_squares(from, targets, king, moves);
    }

    fn castling_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move();
        let king = ColoredPiece::new(us, Piece::King);
        let rook = ColoredPiece::new(us, Piece::Rook);
        let back = match us {
            Color::White => 0,
            Color::Black => 7,
        };
        let king_from = Square::new(back, 4);

        let kingside = self.castle_through_kingside();
        if !kingside.is_empty()
            && self.pos().piece_at(king_from, king)
            && self.pos().piece_at(Square::new(back, 7), rook)
            && self.castle_path_is_clear(kingside, king_from, us)
        {
            moves.push(Move::castle_kingside(king_from, Square::new(back, 6), king));
        }

        let queenside = self.castle_through_queenside();
        if !queenside.is_empty()
            && self.pos().piece_at(king_from, king)
            && self.pos().piece_at(Square::new(back, 0), rook)
            // The rook passes over the b-file square even though the
            // king does not.
            && !self.pos().occupancy().contains(Square::new(back, 1))
            && self.castle_path_is_clear(queenside, king_from, us)
        {
            moves.push(Move::castle_queenside(king_from, Square::new(back, 2), king));
        }
    }

    fn castle_path_is_clear(&self, path: Bitboard, king_from: Square, us: Color) -> bool {
        let occupancy = self.pos().occupancy();
        path.iter().all(|sq| {
            (sq == king_from || !occupancy.contains(sq))
                && self.pos().attacks_to(sq, us, occupancy.0).is_empty()
        })
    }

    fn en_passant_moves(&self, moves: &mut MoveList) {
        let Some(target) = self.en_passant_target() else {
            return;
        };
        let us = self.side_to_move();
        let pawn = ColoredPiece::new(us, Piece::Pawn);
        // Capturing pawns sit on the squares an enemy pawn on the
        // target square would attack.
        let origins = pawn_attacks(us.opponent(), target) & self.pos().pieces(pawn).0;
        for from in Bitboard(origins).iter() {
            moves.push(Move::en_passant(from, target, pawn));
        }
    }

    fn pawn_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move();
        let pawn = ColoredPiece::new(us, Piece::Pawn);
        let occupancy = self.pos().occupancy();
        let enemy = self.pos().color_union(us.opponent());
        let delta = us.pawn_delta();

        for &from in self.pos().piece_squares(pawn) {
            let push = from.offset(delta);
            if !occupancy.contains(push) {
                if push.rank() == us.promotion_rank() {
                    for target in PROMOTION_PIECES {
                        moves.push(Move::promotion(from, push, pawn, target));
                    }
                } else {
                    moves.push(Move::quiet(from, push, pawn));
                }
                if from.rank() == us.pawn_start_rank() {
                    let double = push.offset(delta);
                    if !occupancy.contains(double) {
                        moves.push(Move::double_pawn_push(from, double, pawn));
                    }
                }
            }

            let captures = pawn_attacks(us, from) & enemy.0;
            for to in Bitboard(captures).iter() {
                if to.rank() == us.promotion_rank() {
                    for target in PROMOTION_PIECES {
                        moves.push(Move::promotion_capture(from, to, pawn, target));
                    }
                } else {
                    moves.push(Move::capture(from, to, pawn));
                }
            }
        }
    }

    fn knight_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move();
        let knight = ColoredPiece::new(us, Piece::Knight);
        let own = self.pos().color_union(us).0;
        for &from in self.pos().piece_squares(knight) {
            self.emit_to_squares(from, knight_attacks(from) & !own, knight, moves);
        }
    }

    fn slider_moves(&self, moves: &mut MoveList) {
        let us = self.side_to_move();
        let occupancy = self.pos().occupancy().0;
        let own = self.pos().color_union(us).0;

        let rook = ColoredPiece::new(us, Piece::Rook);
        for &from in self.pos().piece_squares(rook) {
            self.emit_to_squares(from, rook_attacks(from, occupancy) & !own, rook, moves);
        }

        let bishop = ColoredPiece::new(us, Piece::Bishop);
        for &from in self.pos().piece_squares(bishop) {
            self.emit_to_squares(from, bishop_attacks(from, occupancy) & !own, bishop, moves);
        }

        let queen = ColoredPiece::new(us, Piece::Queen);
        for &from in self.pos().piece_squares(queen) {
            let targets = (rook_attacks(from, occupancy) | bishop_attacks(from, occupancy)) & !own;
            self.emit_to_squares(from, targets, queen, moves);
        }
    }
}
