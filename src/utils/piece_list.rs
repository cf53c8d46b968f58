//! Position setup from comma-separated piece lists, e.g. white
//! `"Kd1,Qh2,Nh6,a4,g3,h7"` and black `"Kg7,Qe4,Bf6,b7,e6,g6"`.
//!
//! A token is an optional piece letter (`K Q R B N`; none means pawn)
//! followed by a square name. Castling rights are granted for every king and
//! rook standing on their original squares.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{CastleSide, HOME_KING};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_piece_lists(white: &str, black: &str, side_to_move: Color) -> ChessResult<Position> {
    let mut position = Position::default();

    for (color, list) in [(Color::White, white), (Color::Black, black)] {
        for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (piece, square) = parse_token(token)?;
            if position.occupancy_all.contains(square) {
                return Err(ChessError::piece_list(token, "square is already occupied"));
            }
            if piece == PieceKind::Pawn && (rank_of(square) == 0 || rank_of(square) == 7) {
                return Err(ChessError::piece_list(token, "pawns cannot stand on the back rank"));
            }
            position.pieces[color.index()][piece.index()].insert(square);
            position.occupancy_all.insert(square);
        }

        if position.outposts(color, PieceKind::King).count() != 1 {
            return Err(ChessError::piece_list(list, "each side needs exactly one king"));
        }
    }

    position.side_to_move = side_to_move;
    position.castling_rights = implied_castling_rights(&position);
    position.refresh_derived_state();
    Ok(position)
}

fn parse_token(token: &str) -> ChessResult<(PieceKind, Square)> {
    let mut chars = token.chars();
    let first = chars
        .next()
        .ok_or_else(|| ChessError::piece_list(token, "empty token"))?;

    let (piece, square_name) = match first {
        'K' => (PieceKind::King, &token[1..]),
        'Q' => (PieceKind::Queen, &token[1..]),
        'R' => (PieceKind::Rook, &token[1..]),
        'B' => (PieceKind::Bishop, &token[1..]),
        'N' => (PieceKind::Knight, &token[1..]),
        'a'..='h' => (PieceKind::Pawn, token),
        _ => return Err(ChessError::piece_list(token, "unknown piece letter")),
    };

    let square = algebraic_to_square(square_name)
        .map_err(|_| ChessError::piece_list(token, "bad square"))?;
    Ok((piece, square))
}

fn implied_castling_rights(position: &Position) -> CastlingRights {
    let mut rights = 0;
    for color in Color::BOTH {
        if !position.outposts(color, PieceKind::King).contains(HOME_KING[color.index()]) {
            continue;
        }
        for side in CastleSide::BOTH {
            let (rook_home, _) = side.rook_squares(color);
            if position.outposts(color, PieceKind::Rook).contains(rook_home) {
                rights |= side.right(color);
            }
        }
    }
    rights
}

#[cfg(test)]
mod tests {
    use super::parse_piece_lists;
    use crate::game_state::chess_types::*;

    #[test]
    fn builds_position_from_piece_lists() {
        let position = parse_piece_lists("Kd1,Qh2,Nh6,a4,g3,h7", "Kg7,Qe4,Bf6,b7,e6,g6", Color::White)
            .expect("lists should parse");
        assert_eq!(position.piece_at(3), Some((Color::White, PieceKind::King)));
        assert_eq!(position.piece_at(55), Some((Color::White, PieceKind::Pawn)));
        assert_eq!(position.outposts(Color::Black, PieceKind::Pawn).count(), 3);
        assert_eq!(position.castling_rights, 0);
        assert!(position.is_consistent());
    }

    #[test]
    fn home_king_and_rook_imply_castling_rights() {
        let position =
            parse_piece_lists("Ke1,Rh1,Ra1", "Ke8,Ra8", Color::Black).expect("lists should parse");
        assert_eq!(
            position.castling_rights,
            CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_QUEENSIDE
        );
        assert_eq!(position.side_to_move, Color::Black);
    }

    #[test]
    fn rejects_duplicates_and_bad_tokens() {
        assert!(parse_piece_lists("Ke1,Qe1", "Ke8", Color::White).is_err());
        assert!(parse_piece_lists("Ke1,Xe2", "Ke8", Color::White).is_err());
        assert!(parse_piece_lists("Ke1,a8", "Ke8", Color::White).is_err());
        assert!(parse_piece_lists("Qd1", "Ke8", Color::White).is_err());
    }
}
