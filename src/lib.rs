//! Crate root module declarations for the Quill chess engine.
//!
//! Exposes the board model, move generation, quiescence and alpha-beta search,
//! configuration and notation helpers so the `quill` binary, tests and
//! benchmarks can import stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod bitboard;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rays;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod move_generator;
    pub mod move_ranking;
    pub mod perft;
    pub mod static_exchange;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod game;
    pub mod quiescence;
    pub mod search_clock;
    pub mod search_context;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod bench_positions;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod piece_list;
}
