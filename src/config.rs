//! Engine configuration parsed from environment variables.

use std::time::Duration;

use crate::errors::{ChessError, ChessResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition cache budget in MiB.
    pub cache_mb: usize,
    /// Deepest iterative-deepening iteration.
    pub max_depth: u8,
    /// Wall-clock budget per search.
    pub move_time_ms: Option<u64>,
    /// Node budget per search (main plus quiescence nodes).
    pub node_budget: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cache_mb: 16,
            max_depth: 6,
            move_time_ms: None,
            node_budget: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables with defaults.
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = EngineConfig::default();
        EngineConfig {
            cache_mb: env_parse("QUILL_CACHE_MB").unwrap_or(defaults.cache_mb),
            max_depth: env_parse("QUILL_DEPTH").unwrap_or(defaults.max_depth),
            move_time_ms: env_parse("QUILL_MOVETIME_MS").or(defaults.move_time_ms),
            node_budget: env_parse("QUILL_NODES").or(defaults.node_budget),
        }
    }

    pub fn validate(&self) -> ChessResult<()> {
        if self.cache_mb == 0 {
            return Err(ChessError::InvalidConfig {
                key: "cache_mb",
                reason: "cache size must be at least 1 MiB".to_owned(),
            });
        }
        if self.max_depth == 0 {
            return Err(ChessError::InvalidConfig {
                key: "max_depth",
                reason: "depth must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    #[inline]
    pub fn move_time(&self) -> Option<Duration> {
        self.move_time_ms.map(Duration::from_millis)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
