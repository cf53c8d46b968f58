//! Attack maps, check detection, castling legality and per-square targets.

use crate::game_state::chess_rules::{CastleSide, HOME_KING};
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

impl Position {
    /// Pieces of `attacker_color` attacking `square` when the board holds
    /// `occupancy`. Pieces missing from `occupancy` still appear in the piece
    /// bitboards, so callers that lift pieces mask the result themselves.
    pub fn attackers_to(&self, square: Square, attacker_color: Color, occupancy: Bitboard) -> Bitboard {
        let pawns = self.outposts(attacker_color, PieceKind::Pawn);
        let knights = self.outposts(attacker_color, PieceKind::Knight);
        let bishops = self.outposts(attacker_color, PieceKind::Bishop);
        let rooks = self.outposts(attacker_color, PieceKind::Rook);
        let queens = self.outposts(attacker_color, PieceKind::Queen);
        let kings = self.outposts(attacker_color, PieceKind::King);

        // A pawn of `attacker_color` hits `square` exactly when a pawn of the
        // other color on `square` would hit it back.
        (pawn_attacks(attacker_color.opposite(), square) & pawns)
            | (knight_attacks(square) & knights)
            | (king_attacks(square) & kings)
            | (bishop_attacks(square, occupancy) & (bishops | queens))
            | (rook_attacks(square, occupancy) & (rooks | queens))
    }

    #[inline]
    pub fn is_square_attacked(&self, square: Square, attacker_color: Color) -> bool {
        self.attackers_to(square, attacker_color, self.occupancy_all)
            .is_not_empty()
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, color.opposite()),
            None => false,
        }
    }

    /// Enemy pieces giving check to the side to move.
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        let color = self.side_to_move;
        match self.king_square(color) {
            Some(king) => self.attackers_to(king, color.opposite(), self.occupancy_all),
            None => Bitboard::EMPTY,
        }
    }

    /// Whether `color` may castle (kingside, queenside) right now: the right
    /// is held, king and rook are home, the squares between them are empty and
    /// the king neither stands in, crosses nor lands on an attacked square.
    pub fn can_castle(&self, color: Color) -> (bool, bool) {
        let home = HOME_KING[color.index()];
        if !self.outposts(color, PieceKind::King).contains(home)
            || self.is_square_attacked(home, color.opposite())
        {
            return (false, false);
        }

        let legal = |side: CastleSide| {
            if self.castling_rights & side.right(color) == 0 {
                return false;
            }
            let (rook_home, _) = side.rook_squares(color);
            if !self.outposts(color, PieceKind::Rook).contains(rook_home) {
                return false;
            }
            if (side.empty_path(color) & self.occupancy_all).is_not_empty() {
                return false;
            }
            !side
                .king_path(color)
                .any(|square| self.is_square_attacked(square, color.opposite()))
        };

        (legal(CastleSide::Kingside), legal(CastleSide::Queenside))
    }

    /// Pseudo-legal destinations for the piece on `square`, castling
    /// excluded. Pawn targets include pushes and the en-passant square.
    pub fn targets(&self, square: Square) -> Bitboard {
        let Some((color, piece)) = self.piece_at(square) else {
            return Bitboard::EMPTY;
        };
        let own = self.occupancy(color);

        match piece {
            PieceKind::Pawn => self.pawn_targets(color, square),
            PieceKind::Knight => knight_attacks(square).without(own),
            PieceKind::Bishop => bishop_attacks(square, self.occupancy_all).without(own),
            PieceKind::Rook => rook_attacks(square, self.occupancy_all).without(own),
            PieceKind::Queen => queen_attacks(square, self.occupancy_all).without(own),
            PieceKind::King => king_attacks(square).without(own),
        }
    }

    fn pawn_targets(&self, color: Color, square: Square) -> Bitboard {
        let empty = !self.occupancy_all;
        let (push, start_rank) = match color {
            Color::White => (square + 8, 1),
            Color::Black => (square - 8, 6),
        };

        let mut targets = Bitboard::EMPTY;
        if empty.contains(push) {
            targets.insert(push);
            let double = match color {
                Color::White => push + 8,
                Color::Black => push - 8,
            };
            if rank_of(square) == start_rank && empty.contains(double) {
                targets.insert(double);
            }
        }

        let mut enemies = self.occupancy(color.opposite());
        if let Some(ep) = self.en_passant_square {
            // Only the side that did not make the double push may take it.
            let capture_rank = match color {
                Color::White => 5,
                Color::Black => 2,
            };
            if rank_of(ep) == capture_rank {
                enemies.insert(ep);
            }
        }

        targets | (pawn_attacks(color, square) & enemies)
    }

    /// Whether `mv` (by the side to move) leaves the enemy king in check,
    /// counting discovered checks and the castling rook.
    pub fn gives_check(&self, mv: Move) -> bool {
        let us = self.side_to_move;
        let Some(king) = self.king_square(us.opposite()) else {
            return false;
        };

        let (from, to) = (mv.from(), mv.to());
        let landed = mv.promotion().unwrap_or(mv.piece());

        let mut pieces = self.pieces[us.index()];
        pieces[mv.piece().index()].remove(from);
        pieces[landed.index()].insert(to);

        let mut occupancy = self.occupancy_all.without(Bitboard::bit(from)) | Bitboard::bit(to);
        if mv.is_en_passant() {
            occupancy.remove(en_passant_victim(us, to));
        }
        if mv.is_castle() {
            if let Some(side) = CastleSide::from_king_target(us, to) {
                let (rook_from, rook_to) = side.rook_squares(us);
                occupancy.remove(rook_from);
                occupancy.insert(rook_to);
                pieces[PieceKind::Rook.index()].remove(rook_from);
                pieces[PieceKind::Rook.index()].insert(rook_to);
            }
        }

        let diagonal = pieces[PieceKind::Bishop.index()] | pieces[PieceKind::Queen.index()];
        let straight = pieces[PieceKind::Rook.index()] | pieces[PieceKind::Queen.index()];

        ((pawn_attacks(us.opposite(), king) & pieces[PieceKind::Pawn.index()])
            | (knight_attacks(king) & pieces[PieceKind::Knight.index()])
            | (bishop_attacks(king, occupancy) & diagonal)
            | (rook_attacks(king, occupancy) & straight))
            .is_not_empty()
    }
}

/// Square of the pawn removed by an en-passant capture landing on `target`.
#[inline]
pub fn en_passant_victim(capturing_color: Color, target: Square) -> Square {
    match capturing_color {
        Color::White => target - 8,
        Color::Black => target + 8,
    }
}

#[cfg(test)]
mod tests {
    use super::en_passant_victim;
    use crate::game_state::chess_types::*;
    use crate::moves::move_descriptions::{Move, FLAG_CASTLING};

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn detects_check_from_each_piece_kind() {
        assert!(position("4k3/8/8/8/8/8/3p4/4K3 w - - 0 1").is_in_check(Color::White));
        assert!(position("4k3/8/8/8/8/3n4/8/4K3 w - - 0 1").is_in_check(Color::White));
        assert!(position("4k3/8/8/b7/8/8/8/4K3 w - - 0 1").is_in_check(Color::White));
        assert!(position("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").is_in_check(Color::White));
        assert!(!position("4k3/8/8/8/8/8/4P3/r2NK3 w - - 0 1").is_in_check(Color::White));
    }

    #[test]
    fn checkers_lists_both_pieces_of_a_double_check() {
        let pos = position("4k3/8/8/8/8/5n2/8/r3K3 w - - 0 1");
        let checkers = pos.checkers();
        assert_eq!(checkers.count(), 2);
        assert!(checkers.contains(0));
        assert!(checkers.contains(21));
    }

    #[test]
    fn castling_blocked_by_attacked_transit_square() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(pos.can_castle(Color::White), (true, true));
        assert_eq!(pos.can_castle(Color::Black), (true, true));

        // Black rook on f8 covers f1.
        let pos = position("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(pos.can_castle(Color::White), (false, true));

        // b1 may be attacked for queenside castling, only c1/d1 matter.
        let pos = position("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(pos.can_castle(Color::White), (true, true));

        // In check: no castling at all.
        let pos = position("4k3/8/8/8/8/8/8/R3K2r w KQ - 0 1");
        assert_eq!(pos.can_castle(Color::White), (false, false));
    }

    #[test]
    fn pawn_targets_include_double_push_and_en_passant() {
        let pos = position("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(pos.targets(12), Bitboard::bit(20) | Bitboard::bit(28));

        let pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert_eq!(pos.targets(36), Bitboard::bit(44) | Bitboard::bit(43));
        assert_eq!(en_passant_victim(Color::White, 43), 35);
    }

    #[test]
    fn gives_check_sees_direct_and_discovered_checks() {
        // Rook e1 behind the bishop on e4, black king e8.
        let pos = position("4k3/8/8/8/4B3/8/8/K3R3 w - - 0 1");
        let discovered = Move::new(28, 19, PieceKind::Bishop, None, None, 0);
        assert!(pos.gives_check(discovered));
        let sideways = Move::new(4, 3, PieceKind::Rook, None, None, 0);
        assert!(!pos.gives_check(sideways));

        let knight = position("4k3/8/8/8/4N3/8/8/K7 w - - 0 1");
        assert!(knight.gives_check(Move::new(28, 45, PieceKind::Knight, None, None, 0)));
        assert!(!knight.gives_check(Move::new(28, 11, PieceKind::Knight, None, None, 0)));
    }

    #[test]
    fn castling_rook_can_give_check() {
        let pos = position("5k2/8/8/8/8/8/8/4K2R w K - 0 1");
        let castle = Move::new(E1, G1, PieceKind::King, None, None, FLAG_CASTLING);
        assert!(pos.gives_check(castle));
    }
}
