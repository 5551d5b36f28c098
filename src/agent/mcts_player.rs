//! MCTS (Monte Carlo Tree Search) AI player implementation.
//!
//! This module provides an AI player that uses Monte Carlo Tree Search with
//! short random rollouts scored by a heuristic evaluator. The tree itself
//! lives in [`crate::agent::ai::MCTSTree`]; the player owns the
//! configuration, the evaluator, the shared rollout cache and the RNG, and
//! builds a fresh tree for every move.
//!
//! # Algorithm
//!
//! The MCTS algorithm consists of four phases:
//! 1. **Selection**: Traverse the tree using UCB1 plus an estimate bonus
//! 2. **Expansion**: Add one untried move as a new node
//! 3. **Simulation**: Play random moves to the depth limit, then evaluate
//! 4. **Backpropagation**: Update node statistics back up the tree
//!
//! # Root parallelism
//!
//! With `threads > 1` several independent trees search the same root on the
//! rayon pool, all sharing one transposition table. Their root statistics
//! are merged per move before the final choice.

use super::ai::evaluation::{Evaluator, HeuristicEvaluator};
use super::ai::mcts::{select_final_move, ChildStats, MCTSConfig, MCTSStats, MCTSTree};
use super::ai::TranspositionTable;
use super::player::Player;
use super::random_rng;
use crate::error::{Result, SearchError};
use crate::game_repr::{GamePosition, Position};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;

/// MCTS AI player
pub struct MCTSPlayer<P: GamePosition = Position> {
    /// Configuration for the MCTS algorithm
    config: MCTSConfig,
    evaluator: Box<dyn Evaluator<P>>,
    /// Rollout score cache, shareable with other players
    cache: Arc<TranspositionTable>,
    /// Source of per-tree seeds; None searches deterministically
    rng: Option<StdRng>,
    /// Display name for this player
    name: String,
    last_stats: Option<MCTSStats>,
}

impl MCTSPlayer<Position> {
    /// MCTS player with the combined chess evaluator
    pub fn with_config(config: MCTSConfig) -> Self {
        Self::new(config, HeuristicEvaluator::combined(), "MCTS")
    }
}

impl<P: GamePosition> MCTSPlayer<P> {
    /// Create a new MCTS AI player seeded from the operating system
    pub fn new(
        config: MCTSConfig,
        evaluator: impl Evaluator<P> + 'static,
        name: impl Into<String>,
    ) -> Self {
        Self {
            config,
            evaluator: Box::new(evaluator),
            cache: Arc::new(TranspositionTable::new()),
            rng: random_rng(),
            name: name.into(),
            last_stats: None,
        }
    }

    /// Reproducible searches from a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    /// First untried move on expansion, first legal move in rollouts
    pub fn without_randomness(mut self) -> Self {
        self.rng = None;
        self
    }

    /// Share a rollout cache with other searches
    pub fn with_cache(mut self, cache: Arc<TranspositionTable>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<TranspositionTable> {
        &self.cache
    }

    /// Statistics of the most recent tree search, None after a fast path
    pub fn last_stats(&self) -> Option<MCTSStats> {
        self.last_stats
    }

    /// Run MCTS to find the best move
    fn search(&mut self, position: &P) -> Result<Option<P::Move>> {
        let threads = self.config.threads.max(1);
        let iterations = self.config.iterations;

        // Per-tree seeds drawn up front so results do not depend on scheduling
        let seeds: Vec<Option<u64>> = (0..threads)
            .map(|_| self.rng.as_mut().map(|rng| rng.gen()))
            .collect();

        let evaluator = self.evaluator.as_ref();
        let cache = self.cache.as_ref();
        let config = self.config;

        let results: Vec<(Vec<ChildStats<P::Move>>, u32)> = if threads == 1 {
            vec![run_tree(position, config, evaluator, cache, seeds[0], iterations)?]
        } else {
            let per_thread = iterations / threads as u32;
            let extra = iterations % threads as u32;

            seeds
                .into_par_iter()
                .enumerate()
                .map(|(thread_id, seed)| {
                    // The first worker takes the remainder
                    let budget = if thread_id == 0 { per_thread + extra } else { per_thread };
                    run_tree(position, config, evaluator, cache, seed, budget)
                })
                .collect::<Result<Vec<_>>>()?
        };

        let root_visits: u32 = results.iter().map(|(_, visits)| visits).sum();
        let children = merge_root_stats(results.into_iter().map(|(children, _)| children));
        let best = select_final_move(&children);

        let stats = MCTSStats {
            root_visits,
            num_children: children.len(),
            best_move_visits: children
                .iter()
                .find(|child| Some(child.mv) == best)
                .map(|child| child.visits)
                .unwrap_or(0),
        };
        debug!(
            "{}: {} trees, {} root visits, best move visited {} times, cache hit rate {:.2}",
            self.name,
            threads,
            stats.root_visits,
            stats.best_move_visits,
            self.cache.hit_rate()
        );
        self.last_stats = Some(stats);

        Ok(best)
    }
}

/// Build one tree, run `iterations` on it and report its root statistics
fn run_tree<P: GamePosition>(
    position: &P,
    config: MCTSConfig,
    evaluator: &dyn Evaluator<P>,
    cache: &TranspositionTable,
    seed: Option<u64>,
    iterations: u32,
) -> Result<(Vec<ChildStats<P::Move>>, u32)> {
    let rng = seed.map(StdRng::seed_from_u64);
    let mut tree = MCTSTree::new(position.clone(), config, evaluator, cache, rng);
    tree.run(iterations)?;
    Ok((tree.root_children(), tree.root().visits))
}

/// Sum visits and values per move across trees; estimates are averaged by
/// visits. Moves keep the order in which they were first seen.
pub fn merge_root_stats<M: Copy + Eq>(
    trees: impl IntoIterator<Item = Vec<ChildStats<M>>>,
) -> Vec<ChildStats<M>> {
    // (stats, visit-weighted estimate sum, plain estimate sum, trees)
    let mut merged: Vec<(ChildStats<M>, f64, f64, u32)> = Vec::new();

    for children in trees {
        for child in children {
            let weighted = child.estimate * child.visits as f64;
            match merged.iter_mut().find(|(stats, ..)| stats.mv == child.mv) {
                Some((stats, weighted_sum, plain_sum, count)) => {
                    stats.visits += child.visits;
                    stats.value_sum += child.value_sum;
                    *weighted_sum += weighted;
                    *plain_sum += child.estimate;
                    *count += 1;
                }
                None => merged.push((child.clone(), weighted, child.estimate, 1)),
            }
        }
    }

    merged
        .into_iter()
        .map(|(mut stats, weighted_sum, plain_sum, count)| {
            stats.estimate = if stats.visits > 0 {
                weighted_sum / stats.visits as f64
            } else {
                plain_sum / count as f64
            };
            stats
        })
        .collect()
}

impl<P: GamePosition> Player<P> for MCTSPlayer<P> {
    fn get_move(&mut self, position: &P) -> Result<P::Move> {
        // Drawn by rule still has legal moves, but the game is over
        if position.status().is_terminal() {
            return Err(SearchError::NoLegalMoves);
        }

        let legal_moves = position.legal_moves();

        match legal_moves.len() {
            0 => return Err(SearchError::NoLegalMoves),
            1 => {
                self.last_stats = None;
                return Ok(legal_moves[0]);
            }
            _ => {}
        }

        match self.search(position)? {
            Some(mv) => Ok(mv),
            None => {
                warn!("{}: search expanded no moves, playing the first legal move", self.name);
                Ok(legal_moves[0])
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
