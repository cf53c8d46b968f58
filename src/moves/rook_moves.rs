//! Rook attacks: the four orthogonal rays cut at their first blockers.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::rays::{ray_attacks, Direction};

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for direction in Direction::ORTHOGONAL {
        attacks |= ray_attacks(square, direction, occupancy);
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::rook_attacks;
    use crate::game_state::chess_types::Bitboard;

    #[test]
    fn rook_from_d4_on_empty_board_sees_fourteen_squares() {
        assert_eq!(rook_attacks(27, Bitboard::EMPTY).count(), 14);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = Bitboard::bit(24);
        let attacks = rook_attacks(a1, blocker_on_a4);

        assert!(attacks.contains(24));
        assert!(!attacks.contains(32));
    }
}
