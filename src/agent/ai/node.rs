// MCTS node arena

use crate::game_repr::{GamePosition, MoveList};

/// Index of a node in its tree's arena
pub type NodeId = u32;

pub const ROOT: NodeId = 0;

/// Statistics smoothing for `estimate`
const ESTIMATE_DECAY: f64 = 0.95;

/// MCTS Node representing a game state in the search tree
///
/// Values are stored from the point of view of the player who made
/// `move_from_parent`, so a parent picks its best child by maximising them
/// directly.
#[derive(Debug, Clone)]
pub struct MCTSNode<P: GamePosition> {
    /// Parent index, None at the root
    pub parent: Option<NodeId>,
    /// Move that led to this node (None for root)
    pub move_from_parent: Option<P::Move>,
    /// Children in expansion order
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded into children
    pub untried_moves: MoveList<P::Move>,
    /// Number of simulations that passed through this node
    pub visits: u32,
    /// Sum of backed-up results, in [0, visits]
    pub value_sum: f64,
    /// Exponential moving average of backed-up results
    pub estimate: f64,
    pub position: P,
}

impl<P: GamePosition> MCTSNode<P> {
    pub fn new(position: P, parent: Option<NodeId>, move_from_parent: Option<P::Move>) -> Self {
        // Finished games are leaves, even when moves remain (draw by rule)
        let untried_moves = if position.status().is_terminal() {
            MoveList::new()
        } else {
            position.legal_moves()
        };

        Self {
            parent,
            move_from_parent,
            children: Vec::new(),
            untried_moves,
            visits: 0,
            value_sum: 0.0,
            estimate: 0.5,
            position,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.is_empty()
    }

    /// Fully expanded without children: a finished game
    pub fn is_leaf(&self) -> bool {
        self.is_fully_expanded() && self.children.is_empty()
    }

    /// Mean backed-up result, 0 for an unvisited node
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f64
        }
    }

    /// Record one simulation result credited to this node
    pub fn update(&mut self, result: f64) {
        self.visits += 1;
        self.value_sum += result;
        self.estimate = ESTIMATE_DECAY * self.estimate + (1.0 - ESTIMATE_DECAY) * result;
    }
}
