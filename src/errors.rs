//! Error types for the input boundary of the engine.
//!
//! Search internals never fail: an illegal candidate move is an `Option::None`
//! and a missing cache entry is simply a miss. Errors only come from parsing
//! FEN, move notation or piece lists, and from invalid configuration.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid FEN {field}: {reason}")]
    InvalidFen { field: &'static str, reason: String },

    #[error("invalid square name '{0}'")]
    InvalidSquare(String),

    #[error("invalid move notation '{0}'")]
    InvalidMoveNotation(String),

    #[error("move {notation} is not legal in this position")]
    IllegalMove { notation: String },

    #[error("invalid piece-list token '{token}': {reason}")]
    InvalidPieceList { token: String, reason: String },

    #[error("invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

pub type ChessResult<T> = Result<T, ChessError>;

impl ChessError {
    pub(crate) fn fen(field: &'static str, reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn piece_list(token: &str, reason: impl Into<String>) -> Self {
        ChessError::InvalidPieceList {
            token: token.to_owned(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChessError;

    #[test]
    fn messages_name_the_offending_input() {
        let err = ChessError::fen("side-to-move", "expected 'w' or 'b', got 'x'");
        assert_eq!(
            err.to_string(),
            "invalid FEN side-to-move: expected 'w' or 'b', got 'x'"
        );
        let err = ChessError::IllegalMove {
            notation: "e2e5".to_owned(),
        };
        assert_eq!(err.to_string(), "move e2e5 is not legal in this position");
    }
}
