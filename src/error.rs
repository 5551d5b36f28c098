//! Search error types

use thiserror::Error;

/// Errors surfaced by the search engines and the position adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The position handed to `get_move` is already decided
    #[error("No legal moves in the given position")]
    NoLegalMoves,

    /// The adapter refused a move the search believed legal
    #[error("Move {mv} could not be applied to the position")]
    InvalidMoveApplication { mv: String },

    #[error("Invalid position: {0}")]
    InvalidPosition(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
