//! Fixed-size transposition cache keyed by Zobrist hash.
//!
//! Direct-mapped: the slot is `key & mask` over a power-of-two table and the
//! full key is kept to tell collisions from hits. Every store overwrites its
//! slot (last write wins).
//!
//! Mate scores are stored relative to the node that holds them and converted
//! back to root-relative scores on probe, so an entry reused at a different
//! ply still reports the right mate distance.

use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::CHECKMATE;
use crate::search::search_context::MAX_PLY;

/// How the stored score relates to the true score of the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheFlag {
    /// The true score.
    Exact,
    /// Upper bound: no move raised alpha.
    Alpha,
    /// Lower bound: a move failed high.
    Beta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: u64,
    pub best_move: Option<Move>,
    /// Node-relative score, see `score_for_cache`.
    pub score: i32,
    pub depth: u8,
    pub flag: CacheFlag,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    /// Stores that replaced an entry for a different position.
    pub collisions: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionCache {
    entries: Vec<Option<CacheEntry>>,
    mask: usize,
    stats: CacheStats,
}

impl TranspositionCache {
    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<Option<CacheEntry>>().max(1);
        let fitting = (bytes / entry_size).max(1);
        // Largest power of two that fits the budget.
        let count = 1usize << (usize::BITS - 1 - fitting.leading_zeros());
        Self {
            entries: vec![None; count],
            mask: count - 1,
            stats: CacheStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = CacheStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    pub fn probe(&mut self, key: u64) -> Option<CacheEntry> {
        self.stats.probes += 1;
        let hit = self.entries[self.idx(key)].filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, entry: CacheEntry) {
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        if matches!(self.entries[idx], Some(existing) if existing.key != entry.key) {
            self.stats.collisions += 1;
        }
        self.entries[idx] = Some(entry);
    }
}

#[inline]
fn is_winning_mate(score: i32) -> bool {
    score > CHECKMATE - MAX_PLY as i32 && score <= CHECKMATE
}

#[inline]
fn is_losing_mate(score: i32) -> bool {
    score >= -CHECKMATE && score < -CHECKMATE + MAX_PLY as i32
}

/// Converts a root-relative score found at `ply` into the node-relative form
/// kept in the cache.
///
/// Fail-hard bounds in the mate band can sit closer to the root than any real
/// mate, so the result is clamped to `[-CHECKMATE, CHECKMATE]`.
#[inline]
pub fn score_for_cache(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if is_winning_mate(score) {
        (score + ply).min(CHECKMATE)
    } else if is_losing_mate(score) {
        (score - ply).max(-CHECKMATE)
    } else {
        score
    }
}

/// Converts a cached node-relative score back to root-relative at `ply`:
/// winning mates move down by `ply`, losing mates up by `ply`.
#[inline]
pub fn score_from_cache(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if is_winning_mate(score) {
        score - ply
    } else if is_losing_mate(score) {
        score + ply
    } else {
        score
    }
}
