use crate::agent::ai::evaluation::{HeuristicEvaluator, Material};
use crate::game_repr::Position;

// ==================== HELPER FUNCTIONS ====================

/// Parse a FEN that the test knows to be valid
pub fn pos(fen: &str) -> Position {
    Position::from_fen(fen).expect("test FEN should parse")
}

/// Cheap evaluator for search tests
pub fn material() -> HeuristicEvaluator {
    HeuristicEvaluator::single(Material)
}

// White: Ra8# is the only mate
pub const BACK_RANK_MATE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

// Fool's mate, White is mated
pub const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

// ==================== TEST MODULES ====================

mod evaluation_tests;
mod move_ordering_tests;
