//! Packed move encoding.
//!
//! A `Move` carries origin, destination, the moving piece, the captured piece
//! (if any), an optional promotion kind and special-move flags. Origin and
//! destination always differ, so a real move is never zero; absence of a move
//! is expressed with `Option<Move>` instead of a sentinel.

use std::fmt;

use crate::game_state::chess_types::{file_of, rank_of, PieceKind, Square};

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const MOVED_PIECE_SHIFT: u32 = 12;
const CAPTURED_PIECE_SHIFT: u32 = 15;
const PROMOTION_PIECE_SHIFT: u32 = 18;

const SQUARE_MASK: u32 = 0x3F;
const PIECE_MASK: u32 = 0x7;
const NO_PIECE_CODE: u32 = 0x7;

pub const FLAG_CAPTURE: u32 = 1 << 21;
pub const FLAG_DOUBLE_PAWN_PUSH: u32 = 1 << 22;
pub const FLAG_EN_PASSANT: u32 = 1 << 23;
pub const FLAG_CASTLING: u32 = 1 << 24;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion_piece: Option<PieceKind>,
        flags: u32,
    ) -> Self {
        debug_assert!(from != to, "origin and destination must differ");
        let mut out = 0u32;
        out |= (from as u32) << FROM_SHIFT;
        out |= (to as u32) << TO_SHIFT;
        out |= (moved_piece.index() as u32) << MOVED_PIECE_SHIFT;
        out |= captured_piece
            .map(|p| p.index() as u32)
            .unwrap_or(NO_PIECE_CODE)
            << CAPTURED_PIECE_SHIFT;
        out |= promotion_piece
            .map(|p| p.index() as u32)
            .unwrap_or(NO_PIECE_CODE)
            << PROMOTION_PIECE_SHIFT;
        if captured_piece.is_some() {
            out |= FLAG_CAPTURE;
        }
        Move(out | flags)
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn piece(self) -> PieceKind {
        PieceKind::from_index(((self.0 >> MOVED_PIECE_SHIFT) & PIECE_MASK) as usize)
            .unwrap_or(PieceKind::Pawn)
    }

    #[inline]
    pub const fn captured(self) -> Option<PieceKind> {
        PieceKind::from_index(((self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK) as usize)
    }

    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        PieceKind::from_index(((self.0 >> PROMOTION_PIECE_SHIFT) & PIECE_MASK) as usize)
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.0 & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.0 & FLAG_CASTLING != 0
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    /// Neither a capture nor a promotion.
    #[inline]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && self.promotion().is_none()
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Long algebraic notation (`e2e4`, `e7e8q`).
    pub fn to_long_algebraic(self) -> String {
        let mut out = String::with_capacity(5);
        push_square(&mut out, self.from());
        push_square(&mut out, self.to());
        if let Some(promo) = self.promotion() {
            out.push(promo.to_char(crate::game_state::chess_types::Color::Black));
        }
        out
    }
}

fn push_square(out: &mut String, square: Square) {
    out.push((b'a' + file_of(square)) as char);
    out.push((b'1' + rank_of(square)) as char);
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_algebraic())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_long_algebraic())
    }
}
