//! Move selection for two-player, perfect-information games, with chess as
//! the shipped game.
//!
//! - [`game_repr`]: the [`GamePosition`](game_repr::GamePosition) capability
//!   and the chess [`Position`](game_repr::Position) adapter
//! - [`agent::ai`]: evaluation, MCTS, negamax, quiescence and the shared
//!   transposition table
//! - [`agent`]: the [`Player`](agent::Player) trait and both engines behind it

pub mod agent;
pub mod error;
pub mod game_repr;

pub use agent::ai::{Evaluator, HeuristicEvaluator, CHECKMATE};
pub use agent::{MCTSPlayer, NegamaxPlayer, Player};
pub use error::{Result, SearchError};
pub use game_repr::{GamePosition, Position};
