// Shared search state and the root driver for negamax
//
// Negamax and quiescence thread a `SearchContext` through the recursion. It
// bundles the evaluator, move ordering, quiescence settings and the injected
// RNG, and counts visited nodes for the search summary.

use super::evaluation::{Evaluator, CHECKMATE};
use super::move_ordering::{order_moves, MoveOrder};
use super::negamax::negamax;
use super::quiescence::QuiescenceConfig;
use crate::error::{Result, SearchError};
use crate::game_repr::{GamePosition, GameStatus};
use log::debug;
use rand::rngs::StdRng;
use std::time::Instant;

/// Everything the recursive searches need besides the position
pub struct SearchContext<'a, P: GamePosition> {
    pub evaluator: &'a dyn Evaluator<P>,
    pub move_order: MoveOrder,
    pub quiescence: QuiescenceConfig,
    pub rng: Option<&'a mut StdRng>,
    /// Nodes visited so far, quiescence nodes included
    pub nodes: u64,
}

impl<'a, P: GamePosition> SearchContext<'a, P> {
    pub fn new(evaluator: &'a dyn Evaluator<P>) -> Self {
        Self {
            evaluator,
            move_order: MoveOrder::default(),
            quiescence: QuiescenceConfig::default(),
            rng: None,
            nodes: 0,
        }
    }

    pub fn with_move_order(mut self, move_order: MoveOrder) -> Self {
        self.move_order = move_order;
        self
    }

    pub fn with_quiescence(mut self, quiescence: QuiescenceConfig) -> Self {
        self.quiescence = quiescence;
        self
    }

    pub fn with_rng(mut self, rng: Option<&'a mut StdRng>) -> Self {
        self.rng = rng;
        self
    }

    /// Static evaluation from the side to move's point of view
    pub fn relative_eval(&self, pos: &P) -> f64 {
        pos.side_to_move().sign() * self.evaluator.evaluate(pos)
    }
}

/// Side-to-move relative score of a finished game found `ply` plies below
/// the root. Nearer mates score further from zero.
pub fn terminal_score(status: GameStatus, ply: u32) -> f64 {
    match status {
        GameStatus::Checkmate => -(CHECKMATE - ply as f64),
        GameStatus::Draw | GameStatus::Ongoing => 0.0,
    }
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    /// Score of the best move for the side to move at the root
    pub score: f64,
    pub depth: u32,
    pub nodes_searched: u64,
    pub time_ms: u64,
}

/// Search `pos` to `depth` plies and report the best move
///
/// Depth 0 still produces a move: each legal move is played and the child
/// with the best static score for the mover wins.
pub fn search_root<P: GamePosition>(
    pos: &P,
    depth: u32,
    ctx: &mut SearchContext<'_, P>,
) -> Result<SearchResult<P::Move>> {
    let start_time = Instant::now();

    let (score, best_move) = if depth == 0 {
        one_ply_search(pos, ctx)?
    } else {
        negamax(pos, depth, 0, f64::NEG_INFINITY, f64::INFINITY, ctx)?
    };

    if best_move.is_none() {
        return Err(SearchError::NoLegalMoves);
    }

    let result = SearchResult {
        best_move,
        score,
        depth,
        nodes_searched: ctx.nodes,
        time_ms: start_time.elapsed().as_millis() as u64,
    };

    print_search_info(&result);
    Ok(result)
}

fn one_ply_search<P: GamePosition>(
    pos: &P,
    ctx: &mut SearchContext<'_, P>,
) -> Result<(f64, Option<P::Move>)> {
    let mut best_score = f64::NEG_INFINITY;
    let mut best_move = None;

    for mv in order_moves(pos, ctx.move_order, ctx.rng.as_deref_mut()) {
        let child = pos.apply(mv)?;
        ctx.nodes += 1;
        let score = -ctx.relative_eval(&child);

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    Ok((best_score, best_move))
}

fn print_search_info<M: std::fmt::Display>(result: &SearchResult<M>) {
    let nps = if result.time_ms > 0 {
        result.nodes_searched * 1000 / result.time_ms
    } else {
        result.nodes_searched
    };

    if let Some(mv) = &result.best_move {
        debug!(
            "depth {} score {:.1} nodes {} time {}ms nps {} bestmove {}",
            result.depth, result.score, result.nodes_searched, result.time_ms, nps, mv
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::{HeuristicEvaluator, Material};
    use crate::game_repr::Position;

    #[test]
    fn test_terminal_score_prefers_short_mates() {
        assert_eq!(terminal_score(GameStatus::Draw, 3), 0.0);
        assert!(terminal_score(GameStatus::Checkmate, 1) < terminal_score(GameStatus::Checkmate, 5));
        assert_eq!(terminal_score(GameStatus::Checkmate, 0), -CHECKMATE);
    }

    #[test]
    fn test_depth_zero_still_returns_a_move() {
        let evaluator = HeuristicEvaluator::single(Material);
        let pos = Position::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let mut ctx = SearchContext::<Position>::new(&evaluator).with_move_order(MoveOrder::Natural);

        let result = search_root(&pos, 0, &mut ctx).unwrap();

        assert_eq!(result.best_move.map(|mv| mv.to_string()), Some("d1d5".to_string()));
    }

    #[test]
    fn test_no_moves_is_an_error() {
        let evaluator = HeuristicEvaluator::single(Material);
        let mated = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
        let mut ctx = SearchContext::<Position>::new(&evaluator);

        assert_eq!(search_root(&mated, 2, &mut ctx).unwrap_err(), SearchError::NoLegalMoves);
    }
}
