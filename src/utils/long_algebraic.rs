//! Long algebraic move notation (`e2e4`, `e7e8q`, `e1g1`).
//!
//! Parsing resolves the text against the moves the generator produces for the
//! position, so the result carries the same flags and captured-piece data as a
//! generated move and is guaranteed legal.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

pub fn long_algebraic_to_move(notation: &str, position: &Position) -> ChessResult<Move> {
    let trimmed = notation.trim();
    if !(4..=5).contains(&trimmed.len()) || !trimmed.is_ascii() {
        return Err(ChessError::InvalidMoveNotation(notation.to_owned()));
    }

    let from = algebraic_to_square(&trimmed[0..2])
        .map_err(|_| ChessError::InvalidMoveNotation(notation.to_owned()))?;
    let to = algebraic_to_square(&trimmed[2..4])
        .map_err(|_| ChessError::InvalidMoveNotation(notation.to_owned()))?;
    let promotion = match trimmed.chars().nth(4) {
        None => None,
        Some(ch) => match PieceKind::from_char(ch.to_ascii_lowercase()) {
            Some((_, piece)) if PieceKind::PROMOTIONS.contains(&piece) => Some(piece),
            _ => return Err(ChessError::InvalidMoveNotation(notation.to_owned())),
        },
    };

    legal_moves(position)
        .into_iter()
        .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
        .ok_or_else(|| ChessError::IllegalMove {
            notation: trimmed.to_owned(),
        })
}
