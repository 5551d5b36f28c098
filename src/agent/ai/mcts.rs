// Monte Carlo Tree Search with evaluation-backed simulations
//
// Each iteration selects a path with UCB1, expands one untried move, plays a
// short random rollout, scores the end position with the evaluator (or
// quiescence search when it is tactically unsettled) and backs the result up
// the path. Rollout scores are shared through the transposition table.

use super::evaluation::{clamp_score, terminal_evaluation, win_probability, Evaluator};
use super::node::{MCTSNode, NodeId, ROOT};
use super::quiescence::{quiescence, QuiescenceConfig};
use super::search::SearchContext;
use super::transposition_table::TranspositionTable;
use crate::error::Result;
use crate::game_repr::{Color, GamePosition, GameStatus};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

// MCTS configuration constants
pub const DEFAULT_ITERATIONS: u32 = 1000;
pub const DEFAULT_SIMULATION_DEPTH: u32 = 10;
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;
pub const DEFAULT_ESTIMATE_BONUS: f64 = 0.1;
pub const DEFAULT_QUIESCENCE_DEPTH: u32 = 3;

// Final move choice: win rate plus a small visit and estimate bonus
const VISIT_BONUS_SCALE: f64 = 100.0;
const FINAL_ESTIMATE_WEIGHT: f64 = 0.2;

/// How the exploration term is scaled over the iterations of one search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExplorationSchedule {
    /// Always the full exploration constant
    Constant,
    /// Multiply the scale by `factor` before every iteration, never going
    /// below `floor`
    Decay { floor: f64, factor: f64 },
}

impl Default for ExplorationSchedule {
    fn default() -> Self {
        ExplorationSchedule::Decay {
            floor: 0.5,
            factor: 0.9995,
        }
    }
}

impl ExplorationSchedule {
    /// Scale for the next iteration given the current one
    pub fn next(&self, current: f64) -> f64 {
        match *self {
            ExplorationSchedule::Constant => 1.0,
            ExplorationSchedule::Decay { floor, factor } => (current * factor).max(floor),
        }
    }
}

/// MCTS search parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MCTSConfig {
    pub iterations: u32,
    /// Random plies played from a new leaf before it is evaluated
    pub simulation_depth: u32,
    pub exploration_constant: f64,
    pub schedule: ExplorationSchedule,
    /// Weight of the running estimate in the selection score
    pub estimate_bonus: f64,
    /// Quiescence depth for unsettled rollout ends, 0 for static evaluation
    pub quiescence_depth: u32,
    /// Independent root-parallel trees. 1 searches on the calling thread.
    pub threads: usize,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            simulation_depth: DEFAULT_SIMULATION_DEPTH,
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            schedule: ExplorationSchedule::default(),
            estimate_bonus: DEFAULT_ESTIMATE_BONUS,
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
            threads: 1,
        }
    }
}

impl MCTSConfig {
    /// Default settings with one tree per logical CPU
    pub fn parallel() -> Self {
        Self {
            threads: num_cpus::get().max(1),
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_simulation_depth(mut self, depth: u32) -> Self {
        self.simulation_depth = depth;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}

/// UCB1 selection score with an estimate bonus
///
/// `exploration` is the exploration constant already multiplied by the
/// schedule's current scale. Unvisited children score infinity.
pub fn ucb1_score(
    visits: u32,
    value_sum: f64,
    estimate: f64,
    parent_visits: u32,
    exploration: f64,
    estimate_bonus: f64,
) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    let visits = visits as f64;
    let exploit = value_sum / visits;
    let explore = exploration * ((parent_visits.max(1) as f64).ln() / visits).sqrt();

    exploit + explore + estimate_bonus * estimate
}

/// Score used to pick the move actually played. Children never visited
/// score negative infinity.
pub fn final_move_score(visits: u32, value_sum: f64, estimate: f64) -> f64 {
    if visits == 0 {
        return f64::NEG_INFINITY;
    }

    value_sum / visits as f64
        + (visits as f64).ln() / VISIT_BONUS_SCALE
        + FINAL_ESTIMATE_WEIGHT * estimate
}

/// Root child statistics, mergeable across root-parallel trees
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<M> {
    pub mv: M,
    pub visits: u32,
    pub value_sum: f64,
    pub estimate: f64,
}

/// Highest `final_move_score`; the first child wins ties and all-unvisited
/// lists
pub fn select_final_move<M: Copy>(children: &[ChildStats<M>]) -> Option<M> {
    let mut best: Option<(f64, M)> = None;

    for child in children {
        let score = final_move_score(child.visits, child.value_sum, child.estimate);
        match best {
            Some((best_score, _)) if score <= best_score => {}
            _ => best = Some((score, child.mv)),
        }
    }

    best.map(|(_, mv)| mv)
}

/// Whether evaluating `pos` statically would miss pending tactics: the side
/// to move is in check, can capture, or has a move after which the
/// opponent is in check or can capture.
pub fn is_tactically_unstable<P: GamePosition>(pos: &P) -> Result<bool> {
    if pos.is_check() {
        return Ok(true);
    }

    let moves = pos.legal_moves();
    if moves.iter().any(|&mv| pos.is_capture(mv)) {
        return Ok(true);
    }

    for mv in moves {
        let child = pos.apply(mv)?;
        if child.is_check() || child.legal_moves().iter().any(|&reply| child.is_capture(reply)) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Statistics about MCTS search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MCTSStats {
    pub root_visits: u32,
    pub num_children: usize,
    pub best_move_visits: u32,
}

/// MCTS Tree for move search
///
/// Nodes live in an arena owned by the tree and are dropped with it.
pub struct MCTSTree<'a, P: GamePosition> {
    nodes: Vec<MCTSNode<P>>,
    config: MCTSConfig,
    evaluator: &'a dyn Evaluator<P>,
    cache: &'a TranspositionTable,
    rng: Option<StdRng>,
    /// Current multiplier on the exploration constant
    temperature: f64,
}

impl<'a, P: GamePosition> MCTSTree<'a, P> {
    /// Create new MCTS tree for a position
    pub fn new(
        root: P,
        config: MCTSConfig,
        evaluator: &'a dyn Evaluator<P>,
        cache: &'a TranspositionTable,
        rng: Option<StdRng>,
    ) -> Self {
        Self {
            nodes: vec![MCTSNode::new(root, None, None)],
            config,
            evaluator,
            cache,
            rng,
            temperature: 1.0,
        }
    }

    pub fn root(&self) -> &MCTSNode<P> {
        &self.nodes[ROOT as usize]
    }

    pub fn node(&self, id: NodeId) -> &MCTSNode<P> {
        &self.nodes[id as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Run the configured number of iterations and pick a move
    pub fn search(&mut self) -> Result<Option<P::Move>> {
        self.run(self.config.iterations)?;
        Ok(self.best_move())
    }

    /// Run `iterations` iterations on this tree
    pub fn run(&mut self, iterations: u32) -> Result<()> {
        for i in 0..iterations {
            self.iteration()?;

            if (i + 1) % 1000 == 0 {
                trace!(
                    "iteration {}: {} nodes, temperature {:.3}, cache hit rate {:.2}",
                    i + 1,
                    self.nodes.len(),
                    self.temperature,
                    self.cache.hit_rate()
                );
            }
        }

        let stats = self.get_stats();
        debug!(
            "mcts: {} iterations, {} root children, best visited {} times, {} nodes",
            stats.root_visits,
            stats.num_children,
            stats.best_move_visits,
            self.nodes.len()
        );
        Ok(())
    }

    /// Single MCTS iteration (selection, expansion, simulation, backpropagation)
    pub fn iteration(&mut self) -> Result<()> {
        self.temperature = self.config.schedule.next(self.temperature);

        let mut leaf = self.select();
        if !self.nodes[leaf as usize].is_fully_expanded() {
            leaf = self.expand(leaf)?;
        }

        let position = self.nodes[leaf as usize].position.clone();
        let side_to_move_result = self.evaluate_leaf(&position)?;

        // Node values belong to the player who moved into the leaf
        self.backpropagate(leaf, 1.0 - side_to_move_result);
        Ok(())
    }

    /// Descend from the root while nodes are fully expanded and have
    /// children
    fn select(&self) -> NodeId {
        let mut current = ROOT;

        loop {
            let node = &self.nodes[current as usize];
            if !node.is_fully_expanded() || node.children.is_empty() {
                return current;
            }
            current = self.select_child(current);
        }
    }

    /// Select best child using UCB1. The first unvisited child is taken
    /// immediately.
    fn select_child(&self, parent: NodeId) -> NodeId {
        let parent = &self.nodes[parent as usize];
        let exploration = self.config.exploration_constant * self.temperature;

        let mut best_id = parent.children[0];
        let mut best_score = f64::NEG_INFINITY;

        for &child_id in &parent.children {
            let child = &self.nodes[child_id as usize];
            let score = ucb1_score(
                child.visits,
                child.value_sum,
                child.estimate,
                parent.visits,
                exploration,
                self.config.estimate_bonus,
            );

            if score == f64::INFINITY {
                return child_id;
            }
            if score > best_score {
                best_score = score;
                best_id = child_id;
            }
        }

        best_id
    }

    /// Turn one untried move of `parent` into a child and return it
    fn expand(&mut self, parent: NodeId) -> Result<NodeId> {
        let untried = self.nodes[parent as usize].untried_moves.len();
        let idx = match self.rng.as_mut() {
            Some(rng) => rng.gen_range(0..untried),
            None => 0,
        };

        let node = &mut self.nodes[parent as usize];
        let mv = node.untried_moves.swap_remove(idx);
        let position = node.position.apply(mv)?;

        let child_id = self.nodes.len() as NodeId;
        self.nodes.push(MCTSNode::new(position, Some(parent), Some(mv)));
        self.nodes[parent as usize].children.push(child_id);

        Ok(child_id)
    }

    /// Outcome of `pos` in [0, 1] for its side to move
    ///
    /// Finished games score directly. Otherwise a cached rollout score of
    /// sufficient depth is reused, or a fresh rollout is run and cached.
    pub fn evaluate_leaf(&mut self, pos: &P) -> Result<f64> {
        match pos.status() {
            GameStatus::Checkmate => return Ok(0.0),
            GameStatus::Draw => return Ok(0.5),
            GameStatus::Ongoing => {}
        }

        let depth = self.config.simulation_depth;
        let key = pos.key();

        let score = match self.cache.probe(key, depth) {
            Some(score) => score,
            None => {
                let score = self.rollout(pos)?;
                self.cache.store(key, score, depth);
                score
            }
        };

        let white = win_probability(score);
        Ok(match pos.side_to_move() {
            Color::White => white,
            Color::Black => 1.0 - white,
        })
    }

    /// Random playout of `simulation_depth` plies, White-positive score of
    /// where it ends
    fn rollout(&mut self, start: &P) -> Result<f64> {
        let mut pos = start.clone();

        for _ in 0..self.config.simulation_depth {
            if pos.status().is_terminal() {
                break;
            }

            let moves = pos.legal_moves();
            let mv = match self.rng.as_mut() {
                Some(rng) => moves.choose(rng).copied(),
                None => moves.first().copied(),
            };

            match mv {
                Some(mv) => pos = pos.apply(mv)?,
                None => break,
            }
        }

        if let Some(score) = terminal_evaluation(&pos) {
            return Ok(score);
        }

        let qdepth = self.config.quiescence_depth;
        if qdepth > 0 && is_tactically_unstable(&pos)? {
            let mut ctx = SearchContext::new(self.evaluator)
                .with_quiescence(QuiescenceConfig::with_depth(qdepth));
            let relative = quiescence(&pos, f64::NEG_INFINITY, f64::INFINITY, qdepth, 0, &mut ctx)?;
            return Ok(clamp_score(pos.side_to_move().sign() * relative));
        }

        Ok(self.evaluator.evaluate(&pos))
    }

    /// Credit `result` to `leaf`, then alternate `1 - result` and `result`
    /// on the way up to the root
    pub fn backpropagate(&mut self, leaf: NodeId, result: f64) {
        let mut current = Some(leaf);
        let mut credit = result;

        while let Some(id) = current {
            let node = &mut self.nodes[id as usize];
            node.update(credit);
            credit = 1.0 - credit;
            current = node.parent;
        }
    }

    /// Root child statistics in expansion order
    pub fn root_children(&self) -> Vec<ChildStats<P::Move>> {
        self.root()
            .children
            .iter()
            .filter_map(|&id| {
                let child = &self.nodes[id as usize];
                child.move_from_parent.map(|mv| ChildStats {
                    mv,
                    visits: child.visits,
                    value_sum: child.value_sum,
                    estimate: child.estimate,
                })
            })
            .collect()
    }

    /// Move to play after the search, or None if nothing was expanded
    pub fn best_move(&self) -> Option<P::Move> {
        select_final_move(&self.root_children())
    }

    /// Get statistics about the search
    pub fn get_stats(&self) -> MCTSStats {
        let children = self.root_children();
        let best = select_final_move(&children);

        MCTSStats {
            root_visits: self.root().visits,
            num_children: children.len(),
            best_move_visits: children
                .iter()
                .find(|child| Some(child.mv) == best)
                .map(|child| child.visits)
                .unwrap_or(0),
        }
    }
}
