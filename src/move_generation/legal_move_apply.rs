//! In-place move application and its exact inverse.
//!
//! `make_move` mutates the position and hands back the `UndoState` that
//! `take_back` consumes. A move that leaves the mover's own king attacked is
//! reverted on the spot and reported as `None`; callers skip it.

use crate::game_state::chess_rules::{rights_kept_after_touching, CastleSide};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::en_passant_victim;
use crate::moves::move_descriptions::Move;
use crate::search::zobrist::{castling_key, en_passant_key, side_to_move_key};

impl Position {
    pub fn make_move(&mut self, mv: Move) -> Option<UndoState> {
        let us = self.side_to_move;
        let them = us.opposite();
        let (from, to) = (mv.from(), mv.to());
        let moved = mv.piece();
        let landed = mv.promotion().unwrap_or(moved);

        let mut undo = UndoState {
            mv,
            captured: None,
            prev_castling_rights: self.castling_rights,
            prev_en_passant_square: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_zobrist_key: self.zobrist_key,
        };

        self.zobrist_key ^= castling_key(self.castling_rights) ^ en_passant_key(self.en_passant_square);

        if mv.is_en_passant() {
            let victim = en_passant_victim(us, to);
            self.remove_piece(them, PieceKind::Pawn, victim);
            undo.captured = Some((PieceKind::Pawn, victim));
        } else if let Some(kind) = self.piece_of_color_at(them, to) {
            self.remove_piece(them, kind, to);
            undo.captured = Some((kind, to));
        }

        self.remove_piece(us, moved, from);
        self.put_piece(us, landed, to);

        if mv.is_castle() {
            if let Some(side) = CastleSide::from_king_target(us, to) {
                let (rook_from, rook_to) = side.rook_squares(us);
                self.remove_piece(us, PieceKind::Rook, rook_from);
                self.put_piece(us, PieceKind::Rook, rook_to);
            }
        }

        self.castling_rights &= rights_kept_after_touching(from) & rights_kept_after_touching(to);
        self.en_passant_square = if mv.is_double_push() {
            Some((from + to) / 2)
        } else {
            None
        };

        if moved == PieceKind::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = them;
        self.zobrist_key ^= side_to_move_key()
            ^ castling_key(self.castling_rights)
            ^ en_passant_key(self.en_passant_square);

        if self.is_in_check(us) {
            self.take_back(undo);
            return None;
        }

        Some(undo)
    }

    /// Restores the position that existed before the `make_move` that
    /// produced `undo`. Records must be returned in reverse order.
    pub fn take_back(&mut self, undo: UndoState) {
        let mv = undo.mv;
        let us = self.side_to_move.opposite();
        let (from, to) = (mv.from(), mv.to());
        let landed = mv.promotion().unwrap_or(mv.piece());

        self.remove_piece(us, landed, to);
        self.put_piece(us, mv.piece(), from);

        if mv.is_castle() {
            if let Some(side) = CastleSide::from_king_target(us, to) {
                let (rook_from, rook_to) = side.rook_squares(us);
                self.remove_piece(us, PieceKind::Rook, rook_to);
                self.put_piece(us, PieceKind::Rook, rook_from);
            }
        }

        if let Some((kind, square)) = undo.captured {
            self.put_piece(us.opposite(), kind, square);
        }

        self.side_to_move = us;
        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.zobrist_key = undo.prev_zobrist_key;
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::*;
    use crate::moves::move_descriptions::{
        Move, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
    };
    use crate::search::zobrist::compute_zobrist_key;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn double_push_sets_en_passant_and_take_back_restores() {
        let mut pos = Position::new_game();
        let before = pos.clone();
        let mv = Move::new(12, 28, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH);

        let undo = pos.make_move(mv).expect("e2e4 is legal");
        assert_eq!(pos.en_passant_square, Some(20));
        assert_eq!(pos.side_to_move, Color::Black);
        assert_eq!(pos.zobrist_key, compute_zobrist_key(&pos));
        assert!(pos.is_consistent());

        pos.take_back(undo);
        assert_eq!(pos, before);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let before = pos.clone();
        let mv = Move::new(36, 43, PieceKind::Pawn, Some(PieceKind::Pawn), None, FLAG_EN_PASSANT);

        let undo = pos.make_move(mv).expect("en passant is legal");
        assert_eq!(pos.piece_at(35), None);
        assert_eq!(pos.piece_at(43), Some((Color::White, PieceKind::Pawn)));
        assert_eq!(undo.captured, Some((PieceKind::Pawn, 35)));
        assert!(pos.is_consistent());

        pos.take_back(undo);
        assert_eq!(pos, before);
    }

    #[test]
    fn castling_moves_the_rook_and_drops_rights() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let before = pos.clone();
        let mv = Move::new(E1, C1, PieceKind::King, None, None, FLAG_CASTLING);

        let undo = pos.make_move(mv).expect("castling is legal");
        assert_eq!(pos.piece_at(D1), Some((Color::White, PieceKind::Rook)));
        assert_eq!(pos.piece_at(A1), None);
        assert_eq!(pos.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert!(pos.is_consistent());

        pos.take_back(undo);
        assert_eq!(pos, before);
    }

    #[test]
    fn capturing_a_corner_rook_drops_the_victims_right() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mv = Move::new(A1, A8, PieceKind::Rook, Some(PieceKind::Rook), None, 0);
        let undo = pos.make_move(mv).expect("rook capture is legal");
        assert_eq!(pos.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_KINGSIDE);
        assert_eq!(pos.halfmove_clock, 0);
        pos.take_back(undo);
        assert_eq!(pos.castling_rights, 0x0F);
    }

    #[test]
    fn promotion_swaps_pawn_for_piece() {
        let mut pos = position("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let before = pos.clone();
        let mv = Move::new(48, 57, PieceKind::Pawn, Some(PieceKind::Rook), Some(PieceKind::Knight), 0);

        let undo = pos.make_move(mv).expect("promotion is legal");
        assert_eq!(pos.piece_at(57), Some((Color::White, PieceKind::Knight)));
        assert!(pos.outposts(Color::White, PieceKind::Pawn).is_empty());

        pos.take_back(undo);
        assert_eq!(pos, before);
    }

    #[test]
    fn self_check_is_rejected_and_position_untouched() {
        // Knight on e2 pinned by the rook on e8.
        let mut pos = position("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let before = pos.clone();
        let mv = Move::new(12, 29, PieceKind::Knight, None, None, 0);
        assert!(pos.make_move(mv).is_none());
        assert_eq!(pos, before);
    }
}
