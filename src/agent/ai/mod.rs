// AI search engines
//
// Two ways of choosing a move over any `GamePosition`:
// - Monte Carlo Tree Search with evaluated rollouts (`mcts`, `node`)
// - Negamax with alpha-beta pruning and quiescence search (`negamax`,
//   `quiescence`, `search`)
//
// Both score positions through the `Evaluator` trait in `evaluation` and
// share move ordering. MCTS caches rollout scores in a sharded
// transposition table that several searches may share.

pub mod evaluation;
pub mod mcts;
pub mod move_ordering;
pub mod negamax;
pub mod node;
pub mod quiescence;
pub mod search;
mod ai_type;
mod negamax_player;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use ai_type::{AIConfig, AIType};
pub use evaluation::{Evaluator, EvaluatorKind, FeatureWeights, HeuristicEvaluator, CHECKMATE};
pub use mcts::{ExplorationSchedule, MCTSConfig, MCTSStats, MCTSTree};
pub use move_ordering::MoveOrder;
pub use negamax_player::{Difficulty, NegamaxConfig, NegamaxPlayer};
pub use quiescence::QuiescenceConfig;
pub use search::{SearchContext, SearchResult};
pub use transposition_table::{TranspositionEntry, TranspositionTable};
