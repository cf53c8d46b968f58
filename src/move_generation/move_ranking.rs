//! Cheap move ordering applied before a node walks its moves.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::MoveGen;
use crate::moves::move_descriptions::Move;

const PREFERRED_MOVE_RANK: i32 = 1_000_000;
const CAPTURE_BASE_RANK: i32 = 100_000;

impl MoveGen {
    /// Orders the buffer best-first: the `preferred` move (typically the
    /// cached best move) leads, then captures by most valuable victim and
    /// least valuable attacker, then promotions by promoted piece. Ties keep
    /// generation order. Rewinds the cursor.
    pub fn quick_rank(&mut self, preferred: Option<Move>) -> &mut Self {
        for ranked in self.list.iter_mut() {
            ranked.rank = rank_move(ranked.mv, preferred);
        }
        self.list.sort_by(|a, b| b.rank.cmp(&a.rank));
        self.rewind()
    }
}

fn rank_move(mv: Move, preferred: Option<Move>) -> i32 {
    if preferred == Some(mv) {
        return PREFERRED_MOVE_RANK;
    }

    let mut rank = 0;
    if let Some(victim) = mv.captured() {
        rank += CAPTURE_BASE_RANK + victim.value() * 16 - attacker_weight(mv.piece());
    }
    if let Some(promotion) = mv.promotion() {
        rank += promotion.value();
    }
    rank
}

// King captures rank last among equal victims without the king's exchange value
// swamping the victim term.
#[inline]
fn attacker_weight(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::King => 1_000,
        other => other.value(),
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::*;
    use crate::move_generation::move_generator::MoveGen;

    #[test]
    fn captures_come_first_by_victim_then_attacker() {
        // Pawn and queen can both take the rook on d5, the queen can also
        // take the knight on g4.
        let pos = Position::from_fen("4k3/8/8/3r4/4P1n1/8/8/3QK3 w - - 0 1")
            .expect("FEN should parse");
        let mut gen = MoveGen::new(0);
        gen.generate_moves(&pos).quick_rank(None);

        let first: Vec<String> = gen.by_ref().take(2).map(|mv| mv.to_long_algebraic()).collect();
        assert_eq!(first, ["e4d5", "d1d5"]);
        let third = gen.next_move().expect("more moves remain");
        assert_eq!(third.to_long_algebraic(), "d1g4");
    }

    #[test]
    fn preferred_move_leads_even_if_quiet() {
        let pos = Position::new_game();
        let mut gen = MoveGen::new(0);
        gen.generate_moves(&pos);
        let preferred = gen.moves().last().expect("moves exist");

        gen.quick_rank(Some(preferred));
        assert_eq!(gen.next_move(), Some(preferred));
    }

    #[test]
    fn queen_promotion_precedes_underpromotions() {
        let pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut gen = MoveGen::new(0);
        gen.pawn_moves(&pos, Color::White).quick_rank(None);
        assert_eq!(gen.next_move().and_then(|mv| mv.promotion()), Some(PieceKind::Queen));
    }
}
