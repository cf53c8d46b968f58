use crate::game_state::chess_types::{Bitboard, Square};

pub const KNIGHT_ATTACKS: [u64; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[square as usize])
}

const fn generate_knight_attacks() -> [u64; 64] {
    const JUMPS: [(i32, i32); 8] = [
        (1, 2),
        (2, 1),
        (2, -1),
        (1, -2),
        (-1, -2),
        (-2, -1),
        (-2, 1),
        (-1, 2),
    ];
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;
        while i < JUMPS.len() {
            attacks |= square_bit_if_valid(file + JUMPS[i].0, rank + JUMPS[i].1);
            i += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}

pub(crate) const fn square_bit_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << (rank * 8 + file)
}

#[cfg(test)]
mod tests {
    use super::knight_attacks;

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        assert_eq!(knight_attacks(27).count(), 8);
    }

    #[test]
    fn knight_in_the_corner_has_two_targets() {
        let attacks = knight_attacks(0);
        assert_eq!(attacks.count(), 2);
        assert!(attacks.contains(10));
        assert!(attacks.contains(17));
    }
}
