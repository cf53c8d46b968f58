//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search stays independent of the heuristic by scoring through the
//! `BoardScorer` trait; `Position::evaluate` uses the default scorer.

use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Score of a side that is mated at the root. Mate found `n` plies from the
/// root scores `CHECKMATE - n` for the winner and `-CHECKMATE + n` for the loser.
pub const CHECKMATE: i32 = 32_000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, position: &Position) -> i32;
}

/// Breakdown of a `PieceSquareScorer` evaluation, white minus black.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationTrace {
    pub material: i32,
    pub placement: i32,
    pub mobility: i32,
    /// Weight of the endgame king table, 0 (opening) to 24 (bare kings).
    pub endgame_weight: i32,
    /// Final score from the side to move's perspective.
    pub total: i32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    fn material_balance_white_minus_black(position: &Position) -> i32 {
        let mut score = 0i32;
        for piece in PieceKind::ALL {
            if piece == PieceKind::King {
                continue;
            }
            let white_count = position.outposts(Color::White, piece).count() as i32;
            let black_count = position.outposts(Color::Black, piece).count() as i32;
            score += (white_count - black_count) * piece.value();
        }
        score
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        relative_to_side(position, Self::material_balance_white_minus_black(position))
    }
}

/// Material, piece-square placement (king table blended towards activity as
/// material comes off) and a small mobility term.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl PieceSquareScorer {
    const MOBILITY_WEIGHT: i32 = 2;

    pub fn trace(position: &Position) -> EvaluationTrace {
        let endgame_weight = endgame_weight(position);
        let material = MaterialScorer::material_balance_white_minus_black(position);

        let mut placement = 0i32;
        for color in Color::BOTH {
            let sign = if color == Color::White { 1 } else { -1 };
            for piece in PieceKind::ALL {
                for sq in position.outposts(color, piece) {
                    placement += sign * piece_square_bonus(piece, color, sq, endgame_weight);
                }
            }
        }

        let mobility = (mobility_for_color(position, Color::White)
            - mobility_for_color(position, Color::Black))
            * Self::MOBILITY_WEIGHT;

        EvaluationTrace {
            material,
            placement,
            mobility,
            endgame_weight,
            total: relative_to_side(position, material + placement + mobility),
        }
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, position: &Position) -> i32 {
        Self::trace(position).total
    }
}

impl Position {
    /// Static evaluation with the default scorer, side-to-move relative.
    #[inline]
    pub fn evaluate(&self) -> i32 {
        PieceSquareScorer.score(self)
    }

    pub fn evaluate_with_trace(&self) -> EvaluationTrace {
        PieceSquareScorer::trace(self)
    }
}

#[inline]
fn relative_to_side(position: &Position, white_minus_black: i32) -> i32 {
    match position.side_to_move {
        Color::White => white_minus_black,
        Color::Black => -white_minus_black,
    }
}

fn mobility_for_color(position: &Position, color: Color) -> i32 {
    let occ = position.occupancy_all;
    let own = position.occupancy(color);
    let mut m = 0u32;

    for sq in position.outposts(color, PieceKind::Pawn) {
        m += pawn_attacks(color, sq).without(own).count();
    }
    for sq in position.outposts(color, PieceKind::Knight) {
        m += knight_attacks(sq).without(own).count();
    }
    for sq in position.outposts(color, PieceKind::Bishop) {
        m += bishop_attacks(sq, occ).without(own).count();
    }
    for sq in position.outposts(color, PieceKind::Rook) {
        m += rook_attacks(sq, occ).without(own).count();
    }
    for sq in position.outposts(color, PieceKind::Queen) {
        m += queen_attacks(sq, occ).without(own).count();
    }
    for sq in position.outposts(color, PieceKind::King) {
        m += king_attacks(sq).without(own).count();
    }

    m as i32
}

fn piece_square_bonus(piece: PieceKind, color: Color, sq: Square, endgame_weight: i32) -> i32 {
    let rank = rank_of(sq) as i32;
    let file = file_of(sq) as i32;
    let r = if color == Color::White { rank } else { 7 - rank };
    let dist_center = (file - 3).abs() + (r - 3).abs();
    let center_bonus = 4 - dist_center;

    match piece {
        PieceKind::Pawn => r * 8 - (file - 3).abs() * 2,
        PieceKind::Knight => center_bonus * 6,
        PieceKind::Bishop => center_bonus * 4 + r,
        PieceKind::Rook => r * 2,
        PieceKind::Queen => center_bonus * 2,
        PieceKind::King => {
            // Sheltered edge king early, centralised king late.
            let opening = if r <= 1 {
                8 - (file - 4).abs() * 2
            } else {
                -center_bonus * 4
            };
            let endgame = center_bonus * 6;
            (opening * (24 - endgame_weight) + endgame * endgame_weight) / 24
        }
    }
}

fn endgame_weight(position: &Position) -> i32 {
    // Phase from non-pawn material; 24 = full opening set.
    let mut phase = 0i32;
    for color in Color::BOTH {
        phase += position.outposts(color, PieceKind::Queen).count() as i32 * 4;
        phase += position.outposts(color, PieceKind::Rook).count() as i32 * 2;
        phase += position.outposts(color, PieceKind::Bishop).count() as i32;
        phase += position.outposts(color, PieceKind::Knight).count() as i32;
    }
    24 - phase.clamp(0, 24)
}
