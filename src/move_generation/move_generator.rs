//! Pseudo-legal move generation into a per-node move buffer.
//!
//! A `MoveGen` belongs to one search node: it remembers the ply it was created
//! for, collects moves from one or more generation passes, is reordered by
//! `quick_rank` and then drained best-first with `next_move`. Generated moves
//! may still leave the mover's king attacked; `Position::make_move` is the
//! final legality filter.

use smallvec::SmallVec;

use crate::game_state::chess_rules::HOME_KING;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{
    Move, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::moves::rays::between;

/// A generated move with its ordering score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedMove {
    pub mv: Move,
    pub rank: i32,
}

#[derive(Debug, Clone, Default)]
pub struct MoveGen {
    ply: usize,
    pub(crate) list: SmallVec<[RankedMove; 64]>,
    head: usize,
}

impl MoveGen {
    pub fn new(ply: usize) -> Self {
        Self {
            ply,
            list: SmallVec::new(),
            head: 0,
        }
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Buffered moves in their current order, ignoring the cursor.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.list.iter().map(|ranked| ranked.mv)
    }

    /// Next move in rank order, `None` once the buffer is exhausted.
    #[inline]
    pub fn next_move(&mut self) -> Option<Move> {
        let ranked = self.list.get(self.head)?;
        self.head += 1;
        Some(ranked.mv)
    }

    /// Rewinds the cursor so the buffer can be walked again.
    #[inline]
    pub fn rewind(&mut self) -> &mut Self {
        self.head = 0;
        self
    }

    /// Every pseudo-legal move for the side to move.
    pub fn generate_moves(&mut self, position: &Position) -> &mut Self {
        let color = position.side_to_move;
        self.pawn_moves(position, color)
            .piece_moves(position, color)
            .king_moves(position, color)
    }

    pub fn pawn_moves(&mut self, position: &Position, color: Color) -> &mut Self {
        self.pawn_moves_into(position, color, Bitboard::FULL)
    }

    /// Knights, bishops, rooks and queens.
    pub fn piece_moves(&mut self, position: &Position, color: Color) -> &mut Self {
        self.piece_moves_into(position, color, Bitboard::FULL)
    }

    /// King steps, plus castling when the king is not in check.
    pub fn king_moves(&mut self, position: &Position, color: Color) -> &mut Self {
        let Some(square) = position.king_square(color) else {
            return self;
        };
        self.move_king(position, color, square, position.targets(square));

        if !position.is_in_check(color) {
            let (kingside, queenside) = position.can_castle(color);
            if kingside {
                self.move_king(position, color, square, Bitboard::bit(G1 + color.home_rank_offset()));
            }
            if queenside {
                self.move_king(position, color, square, Bitboard::bit(C1 + color.home_rank_offset()));
            }
        }
        self
    }

    /// Captures (en passant included) and promotions.
    pub fn generate_captures(&mut self, position: &Position) -> &mut Self {
        let color = position.side_to_move;
        let enemies = position.occupancy(color.opposite());
        let mut pawn_mask = enemies | promotion_rank(color);
        if let Some(ep) = position.en_passant_square {
            pawn_mask.insert(ep);
        }

        self.pawn_moves_into(position, color, pawn_mask)
            .piece_moves_into(position, color, enemies);
        if let Some(square) = position.king_square(color) {
            self.move_king(position, color, square, position.targets(square) & enemies);
        }
        self
    }

    /// Moves that may resolve a check: king steps, and with a single checker
    /// captures of it or interpositions on the line to the king.
    pub fn generate_evasions(&mut self, position: &Position) -> &mut Self {
        let color = position.side_to_move;
        let Some(king) = position.king_square(color) else {
            return self;
        };
        self.move_king(position, color, king, position.targets(king));

        let checkers = position.checkers();
        if checkers.has_many() {
            return self;
        }
        let Some(checker) = checkers.first() else {
            return self;
        };

        let block = Bitboard::bit(checker) | between(king, checker);
        let mut pawn_mask = block;
        if let Some(ep) = position.en_passant_square {
            let victim = crate::move_generation::legal_move_checks::en_passant_victim(color, ep);
            if victim == checker {
                pawn_mask.insert(ep);
            }
        }

        self.pawn_moves_into(position, color, pawn_mask)
            .piece_moves_into(position, color, block)
    }

    /// Non-capturing moves that give check, castling excluded.
    pub fn generate_checks(&mut self, position: &Position) -> &mut Self {
        let color = position.side_to_move;
        let empty = !position.occupancy_all;

        let mut quiet = MoveGen::new(self.ply);
        quiet
            .pawn_moves_into(position, color, empty.without(promotion_rank(color)))
            .piece_moves_into(position, color, empty);
        if let Some(square) = position.king_square(color) {
            quiet.move_king(position, color, square, position.targets(square) & empty);
        }

        self.list.extend(
            quiet
                .list
                .into_iter()
                .filter(|ranked| position.gives_check(ranked.mv)),
        );
        self
    }

    fn pawn_moves_into(&mut self, position: &Position, color: Color, mask: Bitboard) -> &mut Self {
        for square in position.outposts(color, PieceKind::Pawn) {
            self.move_pawn(position, color, square, position.targets(square) & mask);
        }
        self
    }

    fn piece_moves_into(&mut self, position: &Position, color: Color, mask: Bitboard) -> &mut Self {
        let outposts = position
            .occupancy(color)
            .without(position.outposts(color, PieceKind::Pawn) | position.outposts(color, PieceKind::King));
        for square in outposts {
            self.move_piece(position, square, position.targets(square) & mask);
        }
        self
    }

    fn move_pawn(&mut self, position: &Position, color: Color, square: Square, targets: Bitboard) {
        for target in targets {
            let captured = position.piece_of_color_at(color.opposite(), target);

            if promotion_rank(color).contains(target) {
                for promotion in PieceKind::PROMOTIONS {
                    self.add(Move::new(square, target, PieceKind::Pawn, captured, Some(promotion), 0));
                }
                continue;
            }

            let mv = if captured.is_none() && file_of(square) != file_of(target) {
                Move::new(square, target, PieceKind::Pawn, Some(PieceKind::Pawn), None, FLAG_EN_PASSANT)
            } else if square.abs_diff(target) == 16 {
                Move::new(square, target, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH)
            } else {
                Move::new(square, target, PieceKind::Pawn, captured, None, 0)
            };
            self.add(mv);
        }
    }

    fn move_piece(&mut self, position: &Position, square: Square, targets: Bitboard) {
        let Some((color, piece)) = position.piece_at(square) else {
            return;
        };
        for target in targets {
            let captured = position.piece_of_color_at(color.opposite(), target);
            self.add(Move::new(square, target, piece, captured, None, 0));
        }
    }

    fn move_king(&mut self, position: &Position, color: Color, square: Square, targets: Bitboard) {
        for target in targets {
            let captured = position.piece_of_color_at(color.opposite(), target);
            let flags = if square == HOME_KING[color.index()] && square.abs_diff(target) == 2 {
                FLAG_CASTLING
            } else {
                0
            };
            self.add(Move::new(square, target, PieceKind::King, captured, None, flags));
        }
    }

    #[inline]
    fn add(&mut self, mv: Move) {
        self.list.push(RankedMove { mv, rank: 0 });
    }
}

impl Iterator for MoveGen {
    type Item = Move;

    #[inline]
    fn next(&mut self) -> Option<Move> {
        self.next_move()
    }
}

#[inline]
fn promotion_rank(color: Color) -> Bitboard {
    match color {
        Color::White => Bitboard::RANK_8,
        Color::Black => Bitboard::RANK_1,
    }
}

/// Fully legal moves of the side to move, in generation order.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mut scratch = position.clone();
    let mut gen = MoveGen::new(0);
    gen.generate_moves(position);

    gen.filter(|mv| match scratch.make_move(*mv) {
        Some(undo) => {
            scratch.take_back(undo);
            true
        }
        None => false,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{legal_moves, MoveGen};
    use crate::game_state::chess_types::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    fn generated(fen: &str, build: impl FnOnce(&mut MoveGen, &Position)) -> Vec<String> {
        let pos = position(fen);
        let mut gen = MoveGen::new(0);
        build(&mut gen, &pos);
        let mut moves: Vec<String> = gen.moves().map(|mv| mv.to_long_algebraic()).collect();
        moves.sort();
        moves
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut gen = MoveGen::new(0);
        gen.generate_moves(&Position::new_game());
        assert_eq!(gen.len(), 20);
        assert_eq!(legal_moves(&Position::new_game()).len(), 20);
    }

    #[test]
    fn promotion_always_fans_out_to_four_moves() {
        let moves = generated("3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1", |gen, pos| {
            gen.pawn_moves(pos, Color::White);
        });
        assert_eq!(moves, ["e7d8b", "e7d8n", "e7d8q", "e7d8r"]);

        let moves = generated("4k3/8/8/8/8/8/p7/4K3 b - - 0 1", |gen, pos| {
            gen.pawn_moves(pos, Color::Black);
        });
        assert_eq!(moves, ["a2a1b", "a2a1n", "a2a1q", "a2a1r"]);
    }

    #[test]
    fn side_not_on_move_gets_full_promotions_and_tagged_castles() {
        let moves = generated("4k3/8/8/8/8/8/1p6/4K3 w - - 0 1", |gen, pos| {
            gen.pawn_moves(pos, Color::Black);
        });
        assert_eq!(moves, ["b2b1b", "b2b1n", "b2b1q", "b2b1r"]);

        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mut gen = MoveGen::new(0);
        gen.king_moves(&pos, Color::Black);
        let castles: Vec<String> = gen
            .moves()
            .filter(|mv| mv.is_castle())
            .map(|mv| mv.to_long_algebraic())
            .collect();
        assert_eq!(castles, ["e8g8", "e8c8"]);
    }

    #[test]
    fn castles_are_tagged_and_skipped_in_check() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mut gen = MoveGen::new(0);
        gen.king_moves(&pos, Color::White);
        let castles: Vec<String> = gen
            .moves()
            .filter(|mv| mv.is_castle())
            .map(|mv| mv.to_long_algebraic())
            .collect();
        assert_eq!(castles, ["e1g1", "e1c1"]);
        assert_eq!(gen.moves().filter(|mv| !mv.is_castle()).count(), 5);

        let checked = position("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1");
        let mut gen = MoveGen::new(0);
        gen.king_moves(&checked, Color::White);
        assert!(gen.moves().all(|mv| !mv.is_castle()));
    }

    #[test]
    fn captures_include_en_passant_and_quiet_promotions() {
        let moves = generated("4k3/1P6/8/3pP3/8/8/8/4K3 w - d6 0 1", |gen, pos| {
            gen.generate_captures(pos);
        });
        assert_eq!(moves, ["b7b8b", "b7b8n", "b7b8q", "b7b8r", "e5d6"]);
    }

    #[test]
    fn evasions_only_address_the_check() {
        // Rook on e8 checks the king on e1; the bishop on c4 can block on e2
        // or e6, the knight on g7 can capture.
        let fen = "4r1k1/6N1/8/8/2B5/8/8/4K3 w - - 0 1";
        let moves = generated(fen, |gen, pos| {
            gen.generate_evasions(pos);
        });
        assert!(moves.contains(&"c4e2".to_owned()));
        assert!(moves.contains(&"c4e6".to_owned()));
        assert!(moves.contains(&"g7e8".to_owned()));
        assert!(!moves.contains(&"c4b5".to_owned()));
        assert!(moves.iter().all(|mv| mv.starts_with("c4") || mv.starts_with("g7") || mv.starts_with("e1")));
    }

    #[test]
    fn double_check_leaves_only_king_moves() {
        let moves = generated("4k3/8/8/8/8/5n2/1B6/r3K3 w - - 0 1", |gen, pos| {
            gen.generate_evasions(pos);
        });
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.starts_with("e1")));
    }

    #[test]
    fn en_passant_evasion_captures_the_checking_pawn() {
        // Black just played d7d5 giving check to the king on e4.
        let moves = generated("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1", |gen, pos| {
            gen.generate_evasions(pos);
        });
        assert!(moves.contains(&"e5d6".to_owned()));
    }

    #[test]
    fn checks_are_quiet_and_give_check() {
        let pos = position("6k1/8/8/8/8/8/8/R3K3 w Q - 0 1");
        let mut gen = MoveGen::new(0);
        gen.generate_checks(&pos);
        let moves: Vec<String> = gen.moves().map(|mv| mv.to_long_algebraic()).collect();
        assert_eq!(moves, ["a1a8"]);
        assert!(gen.moves().all(|mv| mv.is_quiet() && pos.gives_check(mv)));
    }

    #[test]
    fn next_move_drains_then_stops() {
        let mut gen = MoveGen::new(3);
        gen.generate_moves(&Position::new_game());
        assert_eq!(gen.ply(), 3);
        let mut count = 0;
        while gen.next_move().is_some() {
            count += 1;
        }
        assert_eq!(count, 20);
        assert!(gen.next_move().is_none());
        assert_eq!(gen.rewind().count(), 20);
    }
}
