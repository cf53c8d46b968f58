//! Cooperative cancellation for a single search call.
//!
//! The clock halts on a move-time deadline, a node budget, an external stop
//! flag or an explicit `halt()`. Once halted it stays halted until `reset()`,
//! which the driver calls at the start of every search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Deadline and stop flag are read every this many polls.
const POLL_INTERVAL_MASK: u64 = 1023;

#[derive(Debug, Clone)]
pub struct SearchClock {
    started: Instant,
    move_time: Option<Duration>,
    node_budget: Option<u64>,
    stop_flag: Option<Arc<AtomicBool>>,
    polls: u64,
    halted: bool,
}

impl Default for SearchClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchClock {
    /// A clock with no limits; it only halts when told to.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            move_time: None,
            node_budget: None,
            stop_flag: None,
            polls: 0,
            halted: false,
        }
    }

    pub fn with_move_time(mut self, move_time: Duration) -> Self {
        self.move_time = Some(move_time);
        self
    }

    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    /// Halts when another thread stores `true` into `flag`.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub fn set_limits(&mut self, move_time: Option<Duration>, node_budget: Option<u64>) {
        self.move_time = move_time;
        self.node_budget = node_budget;
    }

    /// Restarts timing and clears the halt for a new search.
    pub fn reset(&mut self) {
        self.started = Instant::now();
        self.polls = 0;
        self.halted = false;
    }

    #[inline]
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Current halt state without checking any limit.
    #[inline]
    pub fn halted(&self) -> bool {
        self.halted
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Checks the limits and returns the halt state. `nodes_searched` is the
    /// running node total of the current search.
    pub fn poll(&mut self, nodes_searched: u64) -> bool {
        if self.halted {
            return true;
        }

        if matches!(self.node_budget, Some(budget) if nodes_searched >= budget) {
            self.halted = true;
            return true;
        }

        self.polls += 1;
        if self.polls & POLL_INTERVAL_MASK == 0 {
            let past_deadline = matches!(self.move_time, Some(limit) if self.started.elapsed() >= limit);
            let stopped = self
                .stop_flag
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed));
            self.halted = past_deadline || stopped;
        }

        self.halted
    }
}
