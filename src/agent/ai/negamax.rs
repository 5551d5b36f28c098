// Negamax Search with Alpha-Beta Pruning
//
// Negamax is a variant of the minimax algorithm that simplifies implementation
// by taking advantage of the zero-sum property of chess: max(a, b) = -min(-a, -b).
// Instead of separate maximizing and minimizing functions, we use one function
// that negates the score at each level.
//
// The function returns (score, best_move) from the perspective of the side to move.

use super::quiescence::quiescence;
use super::search::{terminal_score, SearchContext};
use super::move_ordering::order_moves;
use crate::error::Result;
use crate::game_repr::GamePosition;

/// Negamax search with alpha-beta pruning
///
/// Fail-soft: the returned score may lie outside `[alpha, beta]`. Finished
/// games are scored before the depth check, so a mate is recognised at any
/// depth. At the horizon the static evaluation is used, or quiescence search
/// when `ctx.quiescence` enables it.
///
/// # Arguments
///
/// * `pos` - Current position
/// * `depth` - Remaining search depth
/// * `ply` - Distance from the root, for mate scoring
/// * `alpha` - Lower bound (best score the side to move can guarantee)
/// * `beta` - Upper bound (best score opponent will allow)
///
/// # Returns
///
/// (score, best_move) - best_move is None at leaves and terminal positions
pub fn negamax<P: GamePosition>(
    pos: &P,
    depth: u32,
    ply: u32,
    mut alpha: f64,
    beta: f64,
    ctx: &mut SearchContext<'_, P>,
) -> Result<(f64, Option<P::Move>)> {
    let status = pos.status();
    if status.is_terminal() {
        ctx.nodes += 1;
        return Ok((terminal_score(status, ply), None));
    }

    if depth == 0 {
        if ctx.quiescence.is_enabled() {
            let qdepth = ctx.quiescence.depth;
            let score = quiescence(pos, alpha, beta, qdepth, ply, ctx)?;
            return Ok((score, None));
        }

        ctx.nodes += 1;
        return Ok((ctx.relative_eval(pos), None));
    }

    ctx.nodes += 1;

    let moves = order_moves(pos, ctx.move_order, ctx.rng.as_deref_mut());

    let mut best_score = f64::NEG_INFINITY;
    let mut best_move = None;

    for mv in moves {
        let child = pos.apply(mv)?;
        let (score, _) = negamax(&child, depth - 1, ply + 1, -beta, -alpha, ctx)?;
        let score = -score;

        // Strictly greater: the first of equally good moves is kept
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        if score > alpha {
            alpha = score;
        }

        if alpha >= beta {
            break;
        }
    }

    Ok((best_score, best_move))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::{HeuristicEvaluator, Material, CHECKMATE};
    use crate::agent::ai::move_ordering::MoveOrder;
    use crate::agent::ai::quiescence::QuiescenceConfig;
    use crate::game_repr::Position;

    fn search(fen: &str, depth: u32) -> (f64, Option<String>) {
        let evaluator = HeuristicEvaluator::single(Material);
        let pos = Position::from_fen(fen).unwrap();
        let mut ctx = SearchContext::<Position>::new(&evaluator)
            .with_move_order(MoveOrder::Tactical)
            .with_quiescence(QuiescenceConfig::disabled());

        let (score, mv) = negamax(&pos, depth, 0, f64::NEG_INFINITY, f64::INFINITY, &mut ctx).unwrap();
        (score, mv.map(|mv| mv.to_string()))
    }

    #[test]
    fn test_finds_mate_in_one() {
        // Back rank mate: Ra8#
        let (score, mv) = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 2);
        assert_eq!(mv.as_deref(), Some("a1a8"));
        assert_eq!(score, CHECKMATE - 1.0);
    }

    #[test]
    fn test_prefers_faster_mate() {
        let (mate_in_one, _) = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3);
        assert_eq!(mate_in_one, CHECKMATE - 1.0);
    }

    #[test]
    fn test_terminal_before_depth() {
        // Stalemate at the root is a draw even with depth left
        let (score, mv) = search("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3);
        assert_eq!(score, 0.0);
        assert_eq!(mv, None);
    }

    #[test]
    fn test_wins_hanging_queen() {
        let (score, mv) = search("4k3/8/8/3q4/8/4N3/8/4K3 w - - 0 1", 2);
        assert_eq!(mv.as_deref(), Some("e3d5"));
        assert!(score > 0.0);
    }
}
