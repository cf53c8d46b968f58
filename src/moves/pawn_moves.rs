use crate::game_state::chess_types::{Bitboard, Color, Square};

pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(1);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(-1);

/// Squares a pawn of `color` standing on `square` attacks.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::White => Bitboard(WHITE_PAWN_ATTACKS[square as usize]),
        Color::Black => Bitboard(BLACK_PAWN_ATTACKS[square as usize]),
    }
}

const fn generate_pawn_attacks(forward: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32 + forward;
        let mut attacks = 0u64;
        if rank >= 0 && rank < 8 {
            if file > 0 {
                attacks |= 1u64 << (rank * 8 + file - 1);
            }
            if file < 7 {
                attacks |= 1u64 << (rank * 8 + file + 1);
            }
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::pawn_attacks;
    use crate::game_state::chess_types::{Bitboard, Color};

    #[test]
    fn white_pawn_attacks_from_e2() {
        let e2 = 12u8;
        assert_eq!(pawn_attacks(Color::White, e2), Bitboard::bit(19) | Bitboard::bit(21));
    }

    #[test]
    fn black_pawn_attacks_from_a7() {
        let a7 = 48u8;
        assert_eq!(pawn_attacks(Color::Black, a7), Bitboard::bit(41));
    }
}
