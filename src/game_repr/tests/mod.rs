use super::*;
use chess::{ChessMove, Square};

// ==================== HELPER FUNCTIONS ====================

/// Parse a FEN that the test knows to be valid
pub fn pos(fen: &str) -> Position {
    Position::from_fen(fen).expect("test FEN should parse")
}

/// Shorthand for a non-promoting move
pub fn mv(from: Square, to: Square) -> ChessMove {
    ChessMove::new(from, to, None)
}

// ==================== TEST MODULES ====================

mod move_queries;
