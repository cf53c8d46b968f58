//! Quiescence search: resolves captures, check evasions and quiet checks at
//! the leaves of the main search so positions are not judged mid-exchange.
//!
//! Scores are side-to-move relative. Searched nodes return a score inside
//! `[alpha, beta]` (fail-hard) except for a mate, which scores
//! `-CHECKMATE + ply`. Nodes cut short by the ply limit or the clock return
//! their static score, and cache hits return the stored score.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::MoveGen;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, CHECKMATE};
use crate::search::search_context::{Scored, SearchContext, MAX_PLY};
use crate::search::transposition_table::{score_for_cache, score_from_cache, CacheEntry, CacheFlag};

/// Outcome of one move loop.
enum LoopExit {
    Exhausted,
    FailHigh,
    Halted,
}

/// Best-so-far state of a quiescence node.
struct NodeState {
    alpha: i32,
    beta: i32,
    best: Option<Move>,
    line: Vec<Move>,
    flag: CacheFlag,
    move_count: u64,
}

impl<'a, S: BoardScorer> SearchContext<'a, S> {
    /// Quiescence search of `position` at the context's current ply. Quiet
    /// checking moves are tried at this node, captures only below it.
    pub fn search_quiescence(&mut self, position: &mut Position, alpha: i32, beta: i32, depth: u8) -> Scored {
        self.quiescence(position, alpha, beta, depth, false)
    }

    fn quiescence(
        &mut self,
        position: &mut Position,
        alpha: i32,
        beta: i32,
        depth: u8,
        captures_only: bool,
    ) -> Scored {
        let ply = self.ply();
        if ply >= MAX_PLY || self.halted() {
            return Scored::leaf(self.evaluate(position));
        }

        let mut preferred = None;
        if let Some(cached) = self.cache.probe(position.zobrist_key) {
            preferred = cached.best_move;
            if cached.depth >= depth {
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
        let mut node = NodeState {
            alpha,
            beta,
            best: None,
            line: Vec::new(),
            flag: CacheFlag::Alpha,
            move_count: 0,
        };

        // Stand pat: a side not in check may decline every capture.
        let static_score = self.evaluate(position);
        if !in_check && static_score > node.alpha {
            node.alpha = static_score;
        }
        if node.alpha >= node.beta {
            return Scored::leaf(node.beta);
        }

        let mut gen = MoveGen::new(ply);
        if in_check {
            gen.generate_evasions(position);
        } else {
            gen.generate_captures(position);
        }
        gen.quick_rank(preferred);

        let mut exit = self.search_moves(position, &mut gen, &mut node, depth, !in_check, true);

        if matches!(exit, LoopExit::Exhausted) && !in_check && !captures_only {
            let mut checks = MoveGen::new(ply);
            checks.generate_checks(position).quick_rank(preferred);
            exit = self.search_moves(position, &mut checks, &mut node, depth, true, false);
        }

        let score = match exit {
            LoopExit::Halted => return Scored { score: node.alpha, line: node.line },
            LoopExit::FailHigh => node.beta,
            LoopExit::Exhausted if in_check && node.move_count == 0 => -CHECKMATE + ply as i32,
            LoopExit::Exhausted => node.alpha,
        };

        self.cache.store(CacheEntry {
            key: position.zobrist_key,
            best_move: node.best,
            score: score_for_cache(score, ply),
            depth,
            flag: node.flag,
        });

        Scored { score, line: node.line }
    }

    /// Walks `gen`, recursing into every legal move that survives the
    /// exchange filter. Only the quiet-checks pass (`captures_only == false`
    /// for its children) re-polls the clock after each child.
    fn search_moves(
        &mut self,
        position: &mut Position,
        gen: &mut MoveGen,
        node: &mut NodeState,
        depth: u8,
        prune_losing_exchanges: bool,
        child_captures_only: bool,
    ) -> LoopExit {
        while let Some(mv) = gen.next_move() {
            if prune_losing_exchanges && position.exchange(mv) < 0 {
                self.stats.see_pruned += 1;
                continue;
            }
            let Some(undo) = self.make(position, mv) else {
                continue;
            };
            node.move_count += 1;
            self.stats.qnodes += 1;
            let child = self.quiescence(position, -node.beta, -node.alpha, depth, child_captures_only);
            self.take_back(position, undo);

            if !child_captures_only && self.clock.halted() {
                return LoopExit::Halted;
            }

            let score = -child.score;
            if score > node.alpha {
                node.alpha = score;
                node.best = Some(mv);
                node.flag = CacheFlag::Exact;
                node.line = Scored::extend(mv, child.line);

                if node.alpha >= node.beta {
                    node.flag = CacheFlag::Beta;
                    return LoopExit::FailHigh;
                }
            }
        }
        LoopExit::Exhausted
    }
}
