//! Search session: owns the cache, the clock and the configuration, and runs
//! iterative deepening over the alpha-beta driver.

use std::fmt::Write as _;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::legal_moves;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer, CHECKMATE};
use crate::search::search_clock::SearchClock;
use crate::search::search_context::{SearchContext, MAX_PLY};
use crate::search::transposition_table::{CacheStats, TranspositionCache};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    /// Side-to-move relative.
    pub score: i32,
    /// Deepest completed iteration.
    pub depth: u8,
    pub nodes: u64,
    pub qnodes: u64,
    pub see_pruned: u64,
    pub principal_variation: Vec<Move>,
    pub elapsed: Duration,
    pub cache: CacheStats,
    /// Whether the clock stopped the search before `max_depth`.
    pub halted: bool,
}

impl SearchReport {
    /// Moves to mate for a mate score, signed like the score.
    pub fn mate_in(&self) -> Option<i32> {
        if self.score.abs() <= CHECKMATE - MAX_PLY as i32 {
            return None;
        }
        let plies = CHECKMATE - self.score.abs();
        Some((plies + 1) / 2 * self.score.signum())
    }
}

pub struct Game<S: BoardScorer = PieceSquareScorer> {
    config: EngineConfig,
    cache: TranspositionCache,
    clock: SearchClock,
    scorer: S,
}

impl Game<PieceSquareScorer> {
    pub fn new(config: EngineConfig) -> ChessResult<Self> {
        Self::with_scorer(config, PieceSquareScorer)
    }
}

impl<S: BoardScorer> Game<S> {
    pub fn with_scorer(config: EngineConfig, scorer: S) -> ChessResult<Self> {
        config.validate()?;
        let mut clock = SearchClock::new();
        clock.set_limits(config.move_time(), config.node_budget);
        Ok(Self {
            cache: TranspositionCache::new_with_mb(config.cache_mb),
            clock,
            config,
            scorer,
        })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Clock used by `think`; attach a stop flag or halt it from here.
    #[inline]
    pub fn clock_mut(&mut self) -> &mut SearchClock {
        &mut self.clock
    }

    #[inline]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forgets every cached result.
    pub fn new_game(&mut self) {
        self.cache.clear();
    }

    /// Searches `position` until `max_depth` or until the clock halts. An
    /// interrupted iteration is discarded unless it is the first one.
    pub fn think(&mut self, position: &Position) -> SearchReport {
        self.clock.reset();
        let max_depth = self.config.max_depth;
        let mut root = position.clone();
        let mut report = SearchReport::default();

        let mut ctx = SearchContext::new(&mut self.cache, &mut self.clock, &self.scorer);
        for depth in 1..=max_depth {
            let result = ctx.search_root(&mut root, depth);

            let halted = ctx.clock.halted();
            if halted && depth > 1 {
                debug!(depth, nodes = ctx.stats.nodes, "search halted, iteration discarded");
                report.halted = true;
                break;
            }

            // Cut off before any root move finished: the score is just the
            // root window, so report the static score instead.
            report.score = if halted && result.line.is_empty() {
                ctx.evaluate(&root)
            } else {
                result.score
            };
            report.depth = depth;
            if let Some(first) = result.line.first() {
                report.best_move = Some(*first);
                report.principal_variation = result.line;
            }

            info!(
                depth,
                score = report.score,
                nodes = ctx.stats.nodes,
                qnodes = ctx.stats.qnodes,
                pv = %format_line(&report.principal_variation),
                "iteration complete"
            );

            if halted {
                report.halted = true;
                break;
            }
            if report.mate_in().is_some() {
                break;
            }
        }
        let stats = ctx.stats;
        report.elapsed = ctx.clock.elapsed();

        // A first iteration cut short before any root move finished.
        if report.best_move.is_none() {
            report.best_move = legal_moves(position).first().copied();
        }

        report.nodes = stats.nodes;
        report.qnodes = stats.qnodes;
        report.see_pruned = stats.see_pruned;
        report.cache = self.cache.stats();
        report
    }
}

/// Space-separated long algebraic notation.
pub fn format_line(line: &[Move]) -> String {
    let mut out = String::new();
    for (i, mv) in line.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{mv}");
    }
    out
}
