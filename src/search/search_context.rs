//! Per-search state threaded through every recursive call.
//!
//! The context owns the ply counter and the node counters, and borrows the
//! session's cache, clock and scorer for the duration of one search.

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::search_clock::SearchClock;
use crate::search::transposition_table::TranspositionCache;

/// Deepest ply the search will visit; deeper nodes return their static score.
pub const MAX_PLY: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Main-search nodes.
    pub nodes: u64,
    /// Moves tried by quiescence nodes.
    pub qnodes: u64,
    /// Moves skipped for a losing static exchange.
    pub see_pruned: u64,
    /// Cache entries that ended a node without searching it.
    pub cache_hits: u64,
}

/// A node's score together with the best line found below it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scored {
    pub score: i32,
    pub line: Vec<Move>,
}

impl Scored {
    #[inline]
    pub fn leaf(score: i32) -> Self {
        Self {
            score,
            line: Vec::new(),
        }
    }

    /// `mv` followed by the child's line.
    #[inline]
    pub(crate) fn extend(mv: Move, child_line: Vec<Move>) -> Vec<Move> {
        let mut line = Vec::with_capacity(child_line.len() + 1);
        line.push(mv);
        line.extend(child_line);
        line
    }
}

pub struct SearchContext<'a, S: BoardScorer = PieceSquareScorer> {
    pub cache: &'a mut TranspositionCache,
    pub clock: &'a mut SearchClock,
    scorer: &'a S,
    ply: usize,
    pub stats: SearchStats,
}

impl<'a, S: BoardScorer> SearchContext<'a, S> {
    pub fn new(cache: &'a mut TranspositionCache, clock: &'a mut SearchClock, scorer: &'a S) -> Self {
        Self {
            cache,
            clock,
            scorer,
            ply: 0,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    #[inline]
    pub fn evaluate(&self, position: &Position) -> i32 {
        self.scorer.score(position)
    }

    /// Polls the clock with the running node count.
    #[inline]
    pub fn halted(&mut self) -> bool {
        self.clock.poll(self.stats.nodes + self.stats.qnodes)
    }

    /// `make_move` that also steps one ply deeper on success.
    #[inline]
    pub fn make(&mut self, position: &mut Position, mv: Move) -> Option<UndoState> {
        let undo = position.make_move(mv)?;
        self.ply += 1;
        Some(undo)
    }

    #[inline]
    pub fn take_back(&mut self, position: &mut Position, undo: UndoState) {
        position.take_back(undo);
        self.ply -= 1;
    }
}
