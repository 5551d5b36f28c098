//! Position evaluation.
//!
//! Every score is in centipawn-like units from White's point of view:
//! positive favors White, negative favors Black. Searches convert to the
//! side-to-move view themselves with [`Color::sign`].
//!
//! An [`Evaluator`] is the capability the searches consume. The chess
//! implementation, [`HeuristicEvaluator`], is a weighted blend of
//! [`Feature`]s, each of which produces one integer sub-score:
//!
//! | Feature | Default weight |
//! |---|---|
//! | [`Material`] | 1.0 |
//! | [`PieceSquare`] | 0.7 |
//! | [`PawnStructure`] | 0.5 |
//! | [`KingSafety`] | 0.8 |
//! | [`Mobility`] | 0.3 |
//! | [`CenterControl`] | 0.4 |
//!
//! [`PieceActivity`] is not part of the blend. It is available on its own
//! through [`EvaluatorKind::PieceActivity`].
//!
//! Integer sub-scores make the blend exactly antisymmetric: mirroring the
//! position negates every sub-score, and therefore the weighted sum.

mod center_control;
mod king_safety;
mod material;
mod mobility;
mod pawn_structure;
pub mod piece_square_tables;

pub use center_control::CenterControl;
pub use king_safety::KingSafety;
pub use material::{is_endgame, piece_value, Material};
pub use mobility::{Mobility, PieceActivity};
pub use pawn_structure::{is_passed_pawn, PawnStructure};
pub use piece_square_tables::PieceSquare;

use crate::game_repr::{Color, GamePosition, GameStatus, Position};
use chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves, BitBoard,
    Board, Piece, Square,
};
use std::fmt;
use std::str::FromStr;

/// Score of a won position. Every evaluation is clamped to +/- this value.
pub const CHECKMATE: f64 = 20000.0;

/// Centipawn scale of the logistic curve mapping scores to probabilities
const LOGISTIC_SCALE: f64 = 400.0;

/// Map a White-positive score to White's winning probability in [0, 1]
pub fn win_probability(score: f64) -> f64 {
    1.0 / (1.0 + (-score / LOGISTIC_SCALE).exp())
}

/// Clamp to the checkmate range. NaN becomes a draw score.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(-CHECKMATE, CHECKMATE)
    }
}

/// Score of a finished game, or None while it is still going
pub fn terminal_evaluation<P: GamePosition>(pos: &P) -> Option<f64> {
    match pos.status() {
        GameStatus::Ongoing => None,
        // The side to move is the one that got mated
        GameStatus::Checkmate => Some(-pos.side_to_move().sign() * CHECKMATE),
        GameStatus::Draw => Some(0.0),
    }
}

/// Scores positions for the searches
pub trait Evaluator<P>: Send + Sync {
    /// White-positive score, clamped to [-CHECKMATE, CHECKMATE]
    fn evaluate(&self, pos: &P) -> f64;

    /// White's winning chances in [0, 1]
    fn probability(&self, pos: &P) -> f64 {
        win_probability(self.evaluate(pos))
    }

    fn name(&self) -> &str;
}

/// One heuristic sub-score over a chess board, White-positive centipawns
pub trait Feature: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, board: &Board) -> i32;
}

/// Pieces of color `by` attacking `sq`
pub fn attackers_of(board: &Board, sq: Square, by: chess::Color) -> BitBoard {
    let occupied = *board.combined();
    let diagonal = *board.pieces(Piece::Bishop) | *board.pieces(Piece::Queen);
    let straight = *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);

    let attackers = (get_knight_moves(sq) & *board.pieces(Piece::Knight))
        | (get_king_moves(sq) & *board.pieces(Piece::King))
        | (get_bishop_moves(sq, occupied) & diagonal)
        | (get_rook_moves(sq, occupied) & straight)
        // Pawns of `by` sit where a pawn of the other color would attack
        | get_pawn_attacks(sq, !by, *board.pieces(Piece::Pawn));

    attackers & *board.color_combined(by)
}

/// Per-feature weights for [`HeuristicEvaluator::from_weights`]. A zero
/// weight leaves the feature out entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureWeights {
    pub material: f64,
    pub piece_square: f64,
    pub pawn_structure: f64,
    pub king_safety: f64,
    pub mobility: f64,
    pub center_control: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            material: 1.0,
            piece_square: 0.7,
            pawn_structure: 0.5,
            king_safety: 0.8,
            mobility: 0.3,
            center_control: 0.4,
        }
    }
}

/// Weighted sum of features with a terminal short-circuit
pub struct HeuristicEvaluator {
    name: String,
    features: Vec<(f64, Box<dyn Feature>)>,
}

impl HeuristicEvaluator {
    /// An evaluator with no features; scores every ongoing position 0
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            features: Vec::new(),
        }
    }

    pub fn with_feature(mut self, weight: f64, feature: impl Feature + 'static) -> Self {
        self.features.push((weight, Box::new(feature)));
        self
    }

    /// Evaluator made of exactly one feature at weight 1
    pub fn single(feature: impl Feature + 'static) -> Self {
        let name = feature.name();
        Self::new(name).with_feature(1.0, feature)
    }

    /// All six features at their default weights
    pub fn combined() -> Self {
        Self::from_weights(FeatureWeights::default())
    }

    pub fn from_weights(weights: FeatureWeights) -> Self {
        let mut evaluator = Self::new("combined");
        let mut add = |weight: f64, feature: Box<dyn Feature>| {
            if weight != 0.0 {
                evaluator.features.push((weight, feature));
            }
        };

        add(weights.material, Box::new(Material));
        add(weights.piece_square, Box::new(PieceSquare));
        add(weights.pawn_structure, Box::new(PawnStructure));
        add(weights.king_safety, Box::new(KingSafety));
        add(weights.mobility, Box::new(Mobility));
        add(weights.center_control, Box::new(CenterControl));

        evaluator
    }

    /// Raw sub-scores, in feature order
    pub fn breakdown(&self, board: &Board) -> Vec<(&'static str, i32)> {
        self.features
            .iter()
            .map(|(_, feature)| (feature.name(), feature.score(board)))
            .collect()
    }

    fn weighted_sum(&self, board: &Board) -> f64 {
        self.features
            .iter()
            .map(|(weight, feature)| weight * feature.score(board) as f64)
            .sum()
    }
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::combined()
    }
}

impl fmt::Debug for HeuristicEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let features: Vec<(f64, &str)> = self
            .features
            .iter()
            .map(|(weight, feature)| (*weight, feature.name()))
            .collect();

        f.debug_struct("HeuristicEvaluator")
            .field("name", &self.name)
            .field("features", &features)
            .finish()
    }
}

impl Evaluator<Position> for HeuristicEvaluator {
    fn evaluate(&self, pos: &Position) -> f64 {
        if let Some(score) = terminal_evaluation(pos) {
            return score;
        }

        clamp_score(self.weighted_sum(pos.board()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Named evaluator presets for configuration surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvaluatorKind {
    #[default]
    Combined,
    Material,
    PieceSquare,
    PawnStructure,
    KingSafety,
    Mobility,
    CenterControl,
    PieceActivity,
}

impl EvaluatorKind {
    pub fn all() -> &'static [EvaluatorKind] {
        &[
            EvaluatorKind::Combined,
            EvaluatorKind::Material,
            EvaluatorKind::PieceSquare,
            EvaluatorKind::PawnStructure,
            EvaluatorKind::KingSafety,
            EvaluatorKind::Mobility,
            EvaluatorKind::CenterControl,
            EvaluatorKind::PieceActivity,
        ]
    }

    /// Short name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            EvaluatorKind::Combined => "combined",
            EvaluatorKind::Material => "material",
            EvaluatorKind::PieceSquare => "pst",
            EvaluatorKind::PawnStructure => "pawns",
            EvaluatorKind::KingSafety => "king",
            EvaluatorKind::Mobility => "mobility",
            EvaluatorKind::CenterControl => "center",
            EvaluatorKind::PieceActivity => "activity",
        }
    }

    pub fn build(&self) -> HeuristicEvaluator {
        match self {
            EvaluatorKind::Combined => HeuristicEvaluator::combined(),
            EvaluatorKind::Material => HeuristicEvaluator::single(Material),
            EvaluatorKind::PieceSquare => HeuristicEvaluator::single(PieceSquare),
            EvaluatorKind::PawnStructure => HeuristicEvaluator::single(PawnStructure),
            EvaluatorKind::KingSafety => HeuristicEvaluator::single(KingSafety),
            EvaluatorKind::Mobility => HeuristicEvaluator::single(Mobility),
            EvaluatorKind::CenterControl => HeuristicEvaluator::single(CenterControl),
            EvaluatorKind::PieceActivity => HeuristicEvaluator::single(PieceActivity),
        }
    }
}

impl FromStr for EvaluatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EvaluatorKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown evaluator '{}'", s))
    }
}

/// Color whose advantage a White-positive score expresses, for logging
pub fn favored_side(score: f64) -> Option<Color> {
    if score > 0.0 {
        Some(Color::White)
    } else if score < 0.0 {
        Some(Color::Black)
    } else {
        None
    }
}
