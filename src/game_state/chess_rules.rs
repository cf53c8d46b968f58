//! Canonical chess-rule constants: the starting setup, home squares and the
//! fixed castling geometry expressed on the first rank and mirrored per side.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Home square of each side's king, indexed by `Color::index()`.
pub const HOME_KING: [Square; 2] = [E1, E8];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// Castling-rights bit for this wing.
    #[inline]
    pub const fn right(self, color: Color) -> CastlingRights {
        match (color, self) {
            (Color::White, CastleSide::Kingside) => CASTLE_WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => CASTLE_WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => CASTLE_BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => CASTLE_BLACK_QUEENSIDE,
        }
    }

    /// King destination (file G or C on the home rank).
    #[inline]
    pub const fn king_target(self, color: Color) -> Square {
        match self {
            CastleSide::Kingside => G1 + color.home_rank_offset(),
            CastleSide::Queenside => C1 + color.home_rank_offset(),
        }
    }

    /// Rook origin and destination.
    #[inline]
    pub const fn rook_squares(self, color: Color) -> (Square, Square) {
        let offset = color.home_rank_offset();
        match self {
            CastleSide::Kingside => (H1 + offset, F1 + offset),
            CastleSide::Queenside => (A1 + offset, D1 + offset),
        }
    }

    /// Squares that must be empty between king and rook.
    #[inline]
    pub const fn empty_path(self, color: Color) -> Bitboard {
        let first_rank = match self {
            CastleSide::Kingside => 0x60u64,  // f1, g1
            CastleSide::Queenside => 0x0Eu64, // b1, c1, d1
        };
        Bitboard(first_rank << color.home_rank_offset())
    }

    /// Squares the king crosses, which must not be attacked.
    #[inline]
    pub const fn king_path(self, color: Color) -> Bitboard {
        let first_rank = match self {
            CastleSide::Kingside => 0x60u64,  // f1, g1
            CastleSide::Queenside => 0x0Cu64, // c1, d1
        };
        Bitboard(first_rank << color.home_rank_offset())
    }

    /// Wing a king move from its home square lands on, if it is a castle.
    #[inline]
    pub const fn from_king_target(color: Color, target: Square) -> Option<CastleSide> {
        let offset = color.home_rank_offset();
        if target == G1 + offset {
            Some(CastleSide::Kingside)
        } else if target == C1 + offset {
            Some(CastleSide::Queenside)
        } else {
            None
        }
    }
}

/// Castling rights that survive a piece leaving or arriving on `square`.
#[inline]
pub const fn rights_kept_after_touching(square: Square) -> CastlingRights {
    match square {
        A1 => !CASTLE_WHITE_QUEENSIDE,
        H1 => !CASTLE_WHITE_KINGSIDE,
        E1 => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
        A8 => !CASTLE_BLACK_QUEENSIDE,
        H8 => !CASTLE_BLACK_KINGSIDE,
        E8 => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        _ => !0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_geometry_mirrors_between_sides() {
        assert_eq!(CastleSide::Kingside.king_target(Color::White), G1);
        assert_eq!(CastleSide::Kingside.king_target(Color::Black), 62);
        assert_eq!(CastleSide::Queenside.rook_squares(Color::Black), (56, 59));
        assert_eq!(CastleSide::Queenside.empty_path(Color::Black).count(), 3);
        assert!(CastleSide::Kingside.king_path(Color::Black).contains(61));
    }

    #[test]
    fn touching_a_rook_corner_drops_only_that_wing() {
        let rights = CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE;
        assert_eq!(rights & rights_kept_after_touching(H1), CASTLE_WHITE_QUEENSIDE);
        assert_eq!(rights & rights_kept_after_touching(E1), 0);
        assert_eq!(rights & rights_kept_after_touching(27), rights);
    }
}
