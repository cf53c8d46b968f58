use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Everything `take_back` needs to restore the parent position exactly.
///
/// Deliberately neither `Clone` nor `Copy`: each successful `make_move` yields
/// one record and `take_back` consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub captured: Option<(PieceKind, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
    pub prev_zobrist_key: u64,
}
