//! FEN-to-Position parser.
//!
//! Builds a fully-populated position from Forsyth-Edwards Notation, including
//! piece bitboards, rights, clocks, occupancies and the Zobrist key. The clock
//! fields are optional so EPD-style four-field strings are accepted.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessError::fen("board", "missing"))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessError::fen("side-to-move", "missing"))?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(ChessError::fen("trailing", "extra fields after fullmove number"));
    }

    let mut position = Position::default();

    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_square = parse_en_passant_square(en_passant_part)?;
    position.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::fen("halfmove clock", halfmove_part))?;
    position.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::fen("fullmove number", fullmove_part))?;

    position.refresh_derived_state();

    for color in Color::BOTH {
        if position.outposts(color, PieceKind::King).count() != 1 {
            return Err(ChessError::fen("board", "each side needs exactly one king"));
        }
        if (position.outposts(color, PieceKind::Pawn) & (Bitboard::RANK_1 | Bitboard::RANK_8))
            .is_not_empty()
        {
            return Err(ChessError::fen("board", "pawns cannot stand on the back rank"));
        }
    }

    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::fen("board", "layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::fen("board", format!("invalid empty count '{ch}'")));
                }
                file += empty_count as u8;
                continue;
            }

            let (color, piece) = PieceKind::from_char(ch)
                .ok_or_else(|| ChessError::fen("board", format!("invalid piece '{ch}'")))?;

            if file >= 8 {
                return Err(ChessError::fen("board", "rank has too many files"));
            }

            let sq = square_at(file, board_rank);
            position.pieces[color.index()][piece.index()].insert(sq);
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::fen("board", "rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::fen(
            "side-to-move",
            format!("expected 'w' or 'b', got '{side_part}'"),
        )),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(ChessError::fen("castling", format!("invalid character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| ChessError::fen("en-passant", en_passant_part))?;
    if rank_of(square) != 2 && rank_of(square) != 5 {
        return Err(ChessError::fen("en-passant", "target must be on rank 3 or 6"));
    }
    Ok(Some(square))
}
