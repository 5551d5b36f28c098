//! AI Type Registry - Centralized registry for AI implementations
//!
//! This module provides a way to enumerate and instantiate the search engines
//! behind one `Box<dyn Player<Position>>` interface.

use super::evaluation::EvaluatorKind;
use super::mcts::MCTSConfig;
use super::{Difficulty, NegamaxPlayer, TranspositionTable};
use crate::agent::mcts_player::MCTSPlayer;
use crate::agent::player::Player;
use crate::game_repr::Position;
use std::str::FromStr;
use std::sync::Arc;

/// MCTS iterations per difficulty level
fn mcts_iterations(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 200,
        Difficulty::Medium => 1000,
        Difficulty::Hard => 2000,
        Difficulty::Expert => 5000,
    }
}

/// Enumeration of available AI algorithms
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AIType {
    /// Monte Carlo Tree Search with evaluated rollouts
    #[default]
    MCTS,
    /// Classical Negamax AI with alpha-beta pruning
    Negamax,
}

impl AIType {
    /// Get all available AI types
    pub fn all() -> &'static [AIType] {
        &[AIType::MCTS, AIType::Negamax]
    }

    /// Short name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            AIType::MCTS => "mcts",
            AIType::Negamax => "negamax",
        }
    }

    /// Get the display name for this AI type
    pub fn display_name(&self) -> &'static str {
        match self {
            AIType::MCTS => "MCTS",
            AIType::Negamax => "Negamax",
        }
    }

    /// Get a short description of this AI type
    pub fn description(&self) -> &'static str {
        match self {
            AIType::MCTS => "Monte Carlo tree search with evaluated random rollouts",
            AIType::Negamax => "Classical minimax with alpha-beta pruning",
        }
    }

    /// Create a Player instance for this AI type
    ///
    /// This factory method creates a boxed Player trait object configured
    /// with the specified difficulty and evaluator. MCTS players store rollout
    /// scores in `cache`; negamax searches without one.
    pub fn create_player(
        &self,
        difficulty: Difficulty,
        evaluator: EvaluatorKind,
        cache: Arc<TranspositionTable>,
    ) -> Box<dyn Player<Position>> {
        let name = format!("{} ({}, {})", self.display_name(), difficulty.name(), evaluator.name());

        match self {
            AIType::MCTS => {
                let config = MCTSConfig::default().with_iterations(mcts_iterations(difficulty));
                Box::new(MCTSPlayer::new(config, evaluator.build(), name).with_cache(cache))
            }
            AIType::Negamax => Box::new(NegamaxPlayer::new(difficulty.config(), evaluator.build(), name)),
        }
    }
}

impl FromStr for AIType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AIType::all()
            .iter()
            .copied()
            .find(|ai| ai.name() == s.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown engine '{}'", s))
    }
}

/// Configuration for a single AI player
///
/// This stores all settings needed to create an AI player, including the
/// algorithm type and difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AIConfig {
    /// The AI algorithm to use
    pub ai_type: AIType,
    /// The difficulty/strength level
    pub difficulty: Difficulty,
    pub evaluator: EvaluatorKind,
}

impl AIConfig {
    pub fn new(ai_type: AIType, difficulty: Difficulty) -> Self {
        Self {
            ai_type,
            difficulty,
            evaluator: EvaluatorKind::default(),
        }
    }

    pub fn create_player(&self, cache: Arc<TranspositionTable>) -> Box<dyn Player<Position>> {
        self.ai_type.create_player(self.difficulty, self.evaluator, cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::GamePosition;

    #[test]
    fn test_ai_type_all() {
        let all = AIType::all();
        assert!(all.contains(&AIType::MCTS));
        assert!(all.contains(&AIType::Negamax));
    }

    #[test]
    fn test_ai_type_from_str() {
        assert_eq!("mcts".parse::<AIType>(), Ok(AIType::MCTS));
        assert_eq!("Negamax".parse::<AIType>(), Ok(AIType::Negamax));
        assert!("random".parse::<AIType>().is_err());
    }

    #[test]
    fn test_create_players() {
        let cache = Arc::new(TranspositionTable::with_capacity(10_000));
        let pos = Position::default();

        for &ai_type in AIType::all() {
            let config = AIConfig {
                ai_type,
                difficulty: Difficulty::Easy,
                evaluator: EvaluatorKind::Material,
            };
            let mut player = config.create_player(Arc::clone(&cache));
            let mv = player.get_move(&pos).unwrap();

            assert!(pos.legal_moves().contains(&mv));
            assert!(player.name().starts_with(ai_type.display_name()));
        }
    }

    #[test]
    fn test_only_mcts_fills_the_shared_cache() {
        let pos = Position::default();
        let config = |ai_type| AIConfig {
            ai_type,
            difficulty: Difficulty::Easy,
            evaluator: EvaluatorKind::Material,
        };

        let cache = Arc::new(TranspositionTable::with_capacity(10_000));
        config(AIType::Negamax).create_player(Arc::clone(&cache)).get_move(&pos).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.hits() + cache.misses(), 0);

        config(AIType::MCTS).create_player(Arc::clone(&cache)).get_move(&pos).unwrap();
        assert!(!cache.is_empty());
    }
}
