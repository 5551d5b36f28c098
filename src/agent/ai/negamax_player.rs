//! NegamaxPlayer - Classical chess AI using Negamax with Alpha-Beta pruning
//!
//! This module implements an AI player based on the Negamax algorithm, a variant
//! of the Minimax algorithm that treats both players symmetrically. It includes:
//! - Alpha-beta pruning for efficient tree search
//! - Quiescence search at the horizon
//! - Multiple difficulty levels with configurable search depth
//!
//! # Difficulty Levels
//!
//! - **Easy**: Depth 1, static evaluation at the horizon
//! - **Medium**: Depth 2, quiescence depth 2
//! - **Hard**: Depth 3, quiescence depth 3
//! - **Expert**: Depth 4, quiescence depth 3
//!
//! # Examples
//!
//! ```
//! use chess_search::agent::ai::{Difficulty, NegamaxPlayer};
//! use chess_search::agent::Player;
//! use chess_search::game_repr::{GamePosition, Position};
//!
//! let mut ai = NegamaxPlayer::with_difficulty(Difficulty::Easy).without_randomness();
//! let pos = Position::default();
//! let mv = ai.get_move(&pos).unwrap();
//! assert!(pos.legal_moves().contains(&mv));
//! ```

use super::evaluation::{Evaluator, HeuristicEvaluator};
use super::move_ordering::MoveOrder;
use super::quiescence::QuiescenceConfig;
use super::search::{search_root, SearchContext, SearchResult};
use crate::agent::player::Player;
use crate::agent::random_rng;
use crate::error::{Result, SearchError};
use crate::game_repr::{GamePosition, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// AI difficulty levels that map to search depth
///
/// Higher difficulty levels produce stronger play but take longer to compute moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// Depth 1: one ply and a static score
    Easy,
    /// Depth 2 with a short quiescence extension
    #[default]
    Medium,
    /// Depth 3
    Hard,
    /// Depth 4
    Expert,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ]
    }

    /// Get the search depth for this difficulty level, in plies
    pub fn max_depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// Quiescence depth at the horizon, 0 for none
    pub fn quiescence_depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 2,
            Difficulty::Hard | Difficulty::Expert => 3,
        }
    }

    /// Get a display name for this difficulty level
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn config(&self) -> NegamaxConfig {
        NegamaxConfig {
            depth: self.max_depth(),
            move_order: MoveOrder::Tactical,
            quiescence: match self.quiescence_depth() {
                0 => QuiescenceConfig::disabled(),
                depth => QuiescenceConfig::with_depth(depth),
            },
        }
    }
}

/// Negamax search parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegamaxConfig {
    pub depth: u32,
    pub move_order: MoveOrder,
    pub quiescence: QuiescenceConfig,
}

impl Default for NegamaxConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

/// AI Player that uses Negamax algorithm with alpha-beta pruning
///
/// Unlike the MCTS player, Negamax is:
/// - **Depth-limited**: Searches to a fixed depth rather than an iteration budget
/// - **Evaluation-based**: Uses a heuristic evaluation function for leaf nodes
/// - **Deterministic** unless `MoveOrder::Shuffled` is configured with an RNG
pub struct NegamaxPlayer<P: GamePosition = Position> {
    config: NegamaxConfig,
    evaluator: Box<dyn Evaluator<P>>,
    rng: Option<StdRng>,
    /// Display name for this AI player
    name: String,
    last_result: Option<SearchResult<P::Move>>,
}

impl NegamaxPlayer<Position> {
    /// Create an AI with default name and the combined evaluator
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(
            difficulty.config(),
            HeuristicEvaluator::combined(),
            format!("Negamax ({})", difficulty.name()),
        )
    }
}

impl<P: GamePosition> NegamaxPlayer<P> {
    pub fn new(
        config: NegamaxConfig,
        evaluator: impl Evaluator<P> + 'static,
        name: impl Into<String>,
    ) -> Self {
        Self {
            config,
            evaluator: Box::new(evaluator),
            rng: random_rng(),
            name: name.into(),
            last_result: None,
        }
    }

    /// Reproducible shuffled move order from a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// Shuffled move order falls back to natural order
    pub fn without_randomness(mut self) -> Self {
        self.rng = None;
        self
    }

    pub fn config(&self) -> &NegamaxConfig {
        &self.config
    }

    /// Result of the most recent search, None after a fast path
    pub fn last_result(&self) -> Option<&SearchResult<P::Move>> {
        self.last_result.as_ref()
    }
}

impl<P: GamePosition> Player<P> for NegamaxPlayer<P> {
    fn get_move(&mut self, position: &P) -> Result<P::Move> {
        // Drawn by rule still has legal moves, but the game is over
        if position.status().is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        let legal_moves = position.legal_moves();

        match legal_moves.len() {
            0 => return Err(SearchError::NoLegalMoves),
            1 => {
                self.last_result = None;
                return Ok(legal_moves[0]);
            }
            _ => {}
        }

        let mut ctx = SearchContext::new(self.evaluator.as_ref())
            .with_move_order(self.config.move_order)
            .with_quiescence(self.config.quiescence)
            .with_rng(self.rng.as_mut());

        let result = search_root(position, self.config.depth, &mut ctx)?;
        let best_move = result.best_move.ok_or(SearchError::NoLegalMoves)?;
        self.last_result = Some(result);

        Ok(best_move)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
