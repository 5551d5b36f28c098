// Quiescence Search - Tactical Stability Extension
//
// A fixed-depth search stops wherever its budget runs out, often in the
// middle of an exchange. Quiescence keeps searching captures and checks
// until the position is quiet, and scores it only then.
//
// - Stand-pat: the side to move may decline every capture
// - Delta pruning: skip captures that cannot lift the score to alpha
// - MVV-LVA ordering: most valuable victim first
// - Depth limit: the extension is bounded by its own depth budget

use super::move_ordering::noisy_moves;
use super::search::{terminal_score, SearchContext};
use crate::error::Result;
use crate::game_repr::GamePosition;

/// Default quiescence depth
pub const DEFAULT_QUIESCENCE_DEPTH: u32 = 3;

/// Default delta pruning margin - buffer for positional compensation
pub const DEFAULT_DELTA_MARGIN: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuiescenceConfig {
    /// Plies of captures and checks searched past the horizon. Zero
    /// disables the extension.
    pub depth: u32,
    /// Delta pruning margin, None disables delta pruning
    pub delta_margin: Option<f64>,
}

impl Default for QuiescenceConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_QUIESCENCE_DEPTH,
            delta_margin: Some(DEFAULT_DELTA_MARGIN),
        }
    }
}

impl QuiescenceConfig {
    pub fn disabled() -> Self {
        Self {
            depth: 0,
            delta_margin: None,
        }
    }

    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.depth > 0
    }
}

/// Quiescence search - search until position is quiet
///
/// Fail-soft. The score is from the point of view of the side to move at
/// `pos`; `ply` is the distance from the root, used for mate scores.
pub fn quiescence<P: GamePosition>(
    pos: &P,
    mut alpha: f64,
    beta: f64,
    depth: u32,
    ply: u32,
    ctx: &mut SearchContext<'_, P>,
) -> Result<f64> {
    ctx.nodes += 1;

    let status = pos.status();
    if status.is_terminal() {
        return Ok(terminal_score(status, ply));
    }

    // Stand-pat: the value of making no capture at all
    let stand_pat = ctx.relative_eval(pos);
    if depth == 0 || stand_pat >= beta {
        return Ok(stand_pat);
    }
    alpha = alpha.max(stand_pat);

    let mut best_score = stand_pat;

    for mv in noisy_moves(pos) {
        if let Some(margin) = ctx.quiescence.delta_margin {
            // Checks are never pruned, whatever they capture
            let prunable = pos.is_capture(mv) && !pos.gives_check(mv);
            if prunable && stand_pat + pos.victim_value(mv) as f64 + margin < alpha {
                continue;
            }
        }

        let child = pos.apply(mv)?;
        let score = -quiescence(&child, -beta, -alpha, depth - 1, ply + 1, ctx)?;

        if score > best_score {
            best_score = score;
        }
        if score >= beta {
            return Ok(score);
        }
        alpha = alpha.max(score);
    }

    Ok(best_score)
}
