//! Zobrist hashing for position identity in the transposition cache.
//!
//! Keys come from a fixed-seed `StdRng`, so hashes are deterministic across
//! runs, which keeps cache behaviour reproducible in tests and benches.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x5EED_0F_C0FF_EE42;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

#[inline]
pub fn en_passant_key(square: Option<Square>) -> u64 {
    match square {
        Some(sq) => tables().en_passant_file[file_of(sq) as usize],
        None => 0,
    }
}

/// Xor-ed in when black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Full key computed from scratch; make/take-back maintain it incrementally.
pub fn compute_zobrist_key(position: &Position) -> u64 {
    let mut key = 0u64;

    for color in Color::BOTH {
        for piece in PieceKind::ALL {
            for sq in position.outposts(color, piece) {
                key ^= piece_square_key(color, piece, sq);
            }
        }
    }

    if position.side_to_move == Color::Black {
        key ^= side_to_move_key();
    }
    key ^= castling_key(position.castling_rights);
    key ^= en_passant_key(position.en_passant_square);

    key
}
