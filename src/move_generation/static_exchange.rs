//! Static exchange evaluation.
//!
//! Plays out the capture sequence on a move's destination square, each side
//! always recapturing with its least valuable attacker, and returns the
//! material balance for the side making `mv` when both sides may stop
//! capturing whenever continuing would lose material. Sliders uncovered by
//! earlier captures join the exchange (x-rays).

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::en_passant_victim;
use crate::moves::move_descriptions::Move;

// Longest possible sequence is bounded by the 32 pieces on the board.
const MAX_EXCHANGE_DEPTH: usize = 32;

impl Position {
    pub fn exchange(&self, mv: Move) -> i32 {
        let us = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());
        let mut occupancy = self.occupancy_all;

        let mut gain = [0i32; MAX_EXCHANGE_DEPTH];
        gain[0] = if mv.is_en_passant() {
            occupancy.remove(en_passant_victim(us, to));
            PieceKind::Pawn.value()
        } else {
            self.piece_of_color_at(us.opposite(), to)
                .map(PieceKind::value)
                .unwrap_or(0)
        };

        let mut attacker_value = match mv.promotion() {
            Some(promotion) => {
                gain[0] += promotion.value() - PieceKind::Pawn.value();
                promotion.value()
            }
            None => mv.piece().value(),
        };
        let mut attacker_square = from;
        let mut side = us;
        let mut depth = 0usize;

        loop {
            depth += 1;
            gain[depth] = attacker_value - gain[depth - 1];

            occupancy.remove(attacker_square);
            side = side.opposite();

            let attackers = self.attackers_to(to, side, occupancy) & occupancy;
            let Some((square, piece)) = self.least_valuable_attacker(attackers, side) else {
                break;
            };
            attacker_square = square;
            attacker_value = piece.value();

            if depth + 1 >= MAX_EXCHANGE_DEPTH {
                break;
            }
        }

        while depth > 1 {
            depth -= 1;
            gain[depth - 1] = -(-gain[depth - 1]).max(gain[depth]);
        }
        gain[0]
    }

    fn least_valuable_attacker(&self, attackers: Bitboard, color: Color) -> Option<(Square, PieceKind)> {
        PieceKind::ALL.into_iter().find_map(|piece| {
            (attackers & self.outposts(color, piece))
                .first()
                .map(|square| (square, piece))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::*;
    use crate::moves::move_descriptions::Move;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn undefended_piece_wins_its_full_value() {
        let pos = position("4k3/8/8/3r4/8/8/8/3RK3 w - - 0 1");
        let mv = Move::new(3, 35, PieceKind::Rook, Some(PieceKind::Rook), None, 0);
        assert_eq!(pos.exchange(mv), 500);
    }

    #[test]
    fn queen_takes_defended_pawn_loses_material() {
        let pos = position("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1");
        let mv = Move::new(3, 35, PieceKind::Queen, Some(PieceKind::Pawn), None, 0);
        assert_eq!(pos.exchange(mv), 100 - 900);
    }

    #[test]
    fn pawn_takes_defended_knight_still_wins() {
        let pos = position("4k3/8/2p5/3n4/4P3/8/8/4K3 w - - 0 1");
        let mv = Move::new(28, 35, PieceKind::Pawn, Some(PieceKind::Knight), None, 0);
        assert_eq!(pos.exchange(mv), 320 - 100);
    }

    #[test]
    fn xray_rook_behind_rook_backs_up_the_exchange() {
        // White doubled rooks on the d-file against a pawn defended by a rook.
        let pos = position("3rk3/8/8/3p4/8/8/3R4/3RK3 w - - 0 1");
        let mv = Move::new(11, 35, PieceKind::Rook, Some(PieceKind::Pawn), None, 0);
        // RxP RxR RxR: +100 -500 +500
        assert_eq!(pos.exchange(mv), 100);
    }
}
