//! Negamax alpha-beta main search. Depth-zero nodes hand over to quiescence;
//! interior nodes share the transposition cache and its mate normalisation.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::MoveGen;
use crate::search::board_scoring::{BoardScorer, CHECKMATE};
use crate::search::search_context::{Scored, SearchContext, MAX_PLY};
use crate::search::transposition_table::{score_for_cache, score_from_cache, CacheEntry, CacheFlag};

/// Bound wider than any reachable score.
pub const INFINITY: i32 = CHECKMATE + 1;

impl<'a, S: BoardScorer> SearchContext<'a, S> {
    /// Full-window search of `position` to `depth` plies. The returned line
    /// starts with the best root move; it is empty when the side to move has
    /// no legal move or the clock halted before the first move finished.
    pub fn search_root(&mut self, position: &mut Position, depth: u8) -> Scored {
        self.alpha_beta(position, -INFINITY, INFINITY, depth.max(1))
    }

    fn alpha_beta(&mut self, position: &mut Position, mut alpha: i32, beta: i32, depth: u8) -> Scored {
        if depth == 0 {
            return self.search_quiescence(position, alpha, beta, 0);
        }

        let ply = self.ply();
        if ply >= MAX_PLY || self.halted() {
            return Scored::leaf(self.evaluate(position));
        }
        self.stats.nodes += 1;

        let mut preferred = None;
        if let Some(cached) = self.cache.probe(position.zobrist_key) {
            preferred = cached.best_move;
            // The root always searches so it can report a move.
            if ply > 0 && cached.depth >= depth {
                let score = score_from_cache(cached.score, ply);
                let usable = match cached.flag {
                    CacheFlag::Exact => true,
                    CacheFlag::Alpha => score <= alpha,
                    CacheFlag::Beta => score >= beta,
                };
                if usable {
                    self.stats.cache_hits += 1;
                    return Scored::leaf(score);
                }
            }
        }

        let in_check = position.is_in_check(position.side_to_move);
        let mut gen = MoveGen::new(ply);
        gen.generate_moves(position).quick_rank(preferred);

        let mut flag = CacheFlag::Alpha;
        let mut best = None;
        let mut line = Vec::new();
        let mut legal_moves = 0u32;

        while let Some(mv) = gen.next_move() {
            let Some(undo) = self.make(position, mv) else {
                continue;
            };
            legal_moves += 1;
            let child = self.alpha_beta(position, -beta, -alpha, depth - 1);
            self.take_back(position, undo);

            if self.clock.halted() {
                return Scored { score: alpha, line };
            }

            let score = -child.score;
            if score > alpha {
                alpha = score;
                best = Some(mv);
                flag = CacheFlag::Exact;
                line = Scored::extend(mv, child.line);

                if alpha >= beta {
                    flag = CacheFlag::Beta;
                    break;
                }
            }
        }

        let score = if legal_moves == 0 {
            flag = CacheFlag::Exact;
            if in_check {
                -CHECKMATE + ply as i32
            } else {
                0
            }
        } else if flag == CacheFlag::Beta {
            beta
        } else {
            alpha
        };

        self.cache.store(CacheEntry {
            key: position.zobrist_key,
            best_move: best,
            score: score_for_cache(score, ply),
            depth,
            flag,
        });

        Scored { score, line }
    }
}
