//! Perft: exhaustive move-path enumeration to a fixed depth.
//!
//! Walks `generate_moves` + `make_move`/`take_back` on a single mutable
//! position, so it validates generation, legality filtering and undo at once.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::MoveGen;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut scratch = position.clone();
    let mut total = PerftCounts::default();
    perft_recurse(&mut scratch, depth, &mut total);
    total
}

/// Per-root-move leaf counts, in generation order.
pub fn divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    let mut scratch = position.clone();
    let mut out = Vec::new();
    if depth == 0 {
        return out;
    }

    let mut gen = MoveGen::new(0);
    gen.generate_moves(&scratch);
    for mv in gen {
        let Some(undo) = scratch.make_move(mv) else {
            continue;
        };
        let mut counts = PerftCounts::default();
        if depth == 1 {
            counts.nodes = 1;
        } else {
            perft_recurse(&mut scratch, depth - 1, &mut counts);
        }
        scratch.take_back(undo);
        out.push((mv, counts.nodes));
    }
    out
}

fn perft_recurse(position: &mut Position, depth: u8, counts: &mut PerftCounts) {
    let mut gen = MoveGen::new(0);
    gen.generate_moves(position);

    for mv in gen {
        let Some(undo) = position.make_move(mv) else {
            continue;
        };

        if depth == 1 {
            counts.merge(leaf_counts(position, mv));
        } else {
            perft_recurse(position, depth - 1, counts);
        }

        position.take_back(undo);
    }
}

fn leaf_counts(after: &Position, mv: Move) -> PerftCounts {
    PerftCounts {
        nodes: 1,
        captures: mv.is_capture() as u64,
        en_passant: mv.is_en_passant() as u64,
        castles: mv.is_castle() as u64,
        promotions: mv.promotion().is_some() as u64,
        checks: after.is_in_check(after.side_to_move) as u64,
    }
}
