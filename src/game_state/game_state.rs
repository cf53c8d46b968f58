//! Board state: one bitboard per (side, piece kind), per-side occupancy,
//! side to move, castling rights, en-passant target, clocks and the
//! incrementally maintained Zobrist key.
//!
//! Invariant: a side's piece bitboards are pairwise disjoint and their union is
//! that side's occupancy; the two sides' occupancies never intersect. The
//! search mutates a `Position` in place through `make_move` / `take_back`, so a
//! line of play is a strictly nested stack of states rooted at one value.

use std::fmt;

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::search::zobrist::{compute_zobrist_key, piece_square_key};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::piece_list::parse_piece_lists;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    // [color][piece_kind]
    pub pieces: [[Bitboard; 6]; 2],

    pub occupancy_by_color: [Bitboard; 2],
    pub occupancy_all: Bitboard,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub zobrist_key: u64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupancy_by_color: [Bitboard::EMPTY; 2],
            occupancy_all: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
        }
    }
}

impl Position {
    #[inline]
    pub fn new_empty() -> Self {
        let mut position = Self::default();
        position.refresh_derived_state();
        position
    }

    /// Standard initial setup.
    pub fn new_game() -> Self {
        let mut position = Self::default();
        let white = [
            0x0000_0000_0000_FF00,
            0x0000_0000_0000_0042,
            0x0000_0000_0000_0024,
            0x0000_0000_0000_0081,
            0x0000_0000_0000_0008,
            0x0000_0000_0000_0010,
        ];
        for (kind, bits) in white.into_iter().enumerate() {
            position.pieces[Color::White.index()][kind] = Bitboard(bits);
            position.pieces[Color::Black.index()][kind] = Bitboard(mirror_ranks(bits));
        }
        position.castling_rights = CASTLE_WHITE_KINGSIDE
            | CASTLE_WHITE_QUEENSIDE
            | CASTLE_BLACK_KINGSIDE
            | CASTLE_BLACK_QUEENSIDE;
        position.refresh_derived_state();
        position
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Set up from comma-separated piece lists such as `"Kd1,Qh2,a4"`.
    #[inline]
    pub fn from_piece_lists(white: &str, black: &str, side_to_move: Color) -> ChessResult<Self> {
        parse_piece_lists(white, black, side_to_move)
    }

    #[inline]
    pub fn fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn starting_fen() -> &'static str {
        STARTING_POSITION_FEN
    }

    /// Bitboard of one piece kind for one side.
    #[inline]
    pub fn outposts(&self, color: Color, piece: PieceKind) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.outposts(color, PieceKind::King).first()
    }

    #[inline]
    pub fn piece_of_color_at(&self, color: Color, square: Square) -> Option<PieceKind> {
        if !self.occupancy(color).contains(square) {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .find(|piece| self.outposts(color, *piece).contains(square))
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        Color::BOTH.into_iter().find_map(|color| {
            self.piece_of_color_at(color, square)
                .map(|piece| (color, piece))
        })
    }

    /// Adds a piece, keeping occupancy and hash in sync.
    #[inline]
    pub(crate) fn put_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        let bit = Bitboard::bit(square);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupancy_by_color[color.index()] |= bit;
        self.occupancy_all |= bit;
        self.zobrist_key ^= piece_square_key(color, piece, square);
    }

    /// Removes a piece, keeping occupancy and hash in sync.
    #[inline]
    pub(crate) fn remove_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        let bit = Bitboard::bit(square);
        self.pieces[color.index()][piece.index()] ^= bit;
        self.occupancy_by_color[color.index()] ^= bit;
        self.occupancy_all ^= bit;
        self.zobrist_key ^= piece_square_key(color, piece, square);
    }

    /// Recomputes occupancy and hash from the piece bitboards.
    pub(crate) fn refresh_derived_state(&mut self) {
        for color in Color::BOTH {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(Bitboard::EMPTY, |acc, bb| acc | *bb);
        }
        self.occupancy_all = self.occupancy_by_color[0] | self.occupancy_by_color[1];
        self.zobrist_key = compute_zobrist_key(self);
    }

    /// Checks the placement invariant and the hash.
    pub fn is_consistent(&self) -> bool {
        for color in Color::BOTH {
            let mut union = Bitboard::EMPTY;
            for piece in PieceKind::ALL {
                let bb = self.outposts(color, piece);
                if (union & bb).is_not_empty() {
                    return false;
                }
                union |= bb;
            }
            if union != self.occupancy(color) {
                return false;
            }
        }

        (self.occupancy(Color::White) & self.occupancy(Color::Black)).is_empty()
            && self.occupancy_all == self.occupancy(Color::White) | self.occupancy(Color::Black)
            && self.zobrist_key == compute_zobrist_key(self)
    }

    /// Total non-pawn, non-king material of one side.
    pub fn non_pawn_material(&self, color: Color) -> i32 {
        [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]
            .into_iter()
            .map(|piece| self.outposts(color, piece).count() as i32 * piece.value())
            .sum()
    }
}

const fn mirror_ranks(bits: u64) -> u64 {
    bits.swap_bytes()
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let mark = match self.piece_at(square_at(file, rank)) {
                    Some((color, piece)) => piece.to_char(color),
                    None => '.',
                };
                write!(f, " {mark}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(
            f,
            "{} to move",
            match self.side_to_move {
                Color::White => "White",
                Color::Black => "Black",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn new_game_matches_starting_fen() {
        let built = Position::new_game();
        let parsed = Position::from_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(built, parsed);
        assert_eq!(built.fen(), STARTING_POSITION_FEN);
        assert!(built.is_consistent());
    }

    #[test]
    fn piece_lookup_finds_color_and_kind() {
        let position = Position::new_game();
        assert_eq!(position.piece_at(E1), Some((Color::White, PieceKind::King)));
        assert_eq!(position.piece_at(E8), Some((Color::Black, PieceKind::King)));
        assert_eq!(position.piece_at(27), None);
        assert_eq!(position.king_square(Color::Black), Some(E8));
        assert_eq!(position.occupancy_all.count(), 32);
    }

    #[test]
    fn put_and_remove_keep_hash_consistent() {
        let mut position = Position::new_game();
        position.remove_piece(Color::White, PieceKind::Pawn, 12);
        position.put_piece(Color::White, PieceKind::Pawn, 28);
        assert!(position.is_consistent());
    }

    #[test]
    fn display_renders_rank_eight_first() {
        let rendered = Position::new_game().to_string();
        let first = rendered.lines().next().expect("board has lines");
        assert_eq!(first, "8  r n b q k b n r");
    }
}
