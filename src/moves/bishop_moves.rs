//! Bishop attacks: the four diagonal rays cut at their first blockers.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::rays::{ray_attacks, Direction};

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for direction in Direction::DIAGONAL {
        attacks |= ray_attacks(square, direction, occupancy);
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::bishop_attacks;
    use crate::game_state::chess_types::Bitboard;

    #[test]
    fn bishop_from_d4_on_empty_board_sees_thirteen_squares() {
        assert_eq!(bishop_attacks(27, Bitboard::EMPTY).count(), 13);
    }

    #[test]
    fn bishop_blocker_stops_ray() {
        let c1 = 2u8;
        let blocker_on_e3 = Bitboard::bit(20);
        let attacks = bishop_attacks(c1, blocker_on_e3);

        assert!(attacks.contains(20));
        assert!(!attacks.contains(29));
    }
}
