// Properties every evaluator must keep

use super::{pos, FOOLS_MATE};
use crate::agent::ai::evaluation::{
    clamp_score, favored_side, win_probability, Evaluator, EvaluatorKind, FeatureWeights,
    HeuristicEvaluator, Material, CHECKMATE,
};
use crate::game_repr::{Color, Position, START_FEN};

const MIDDLEGAMES: &[&str] = &[
    START_FEN,
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "r3k2r/ppp2ppp/2n1bn2/3pp3/3PP3/2N1BN2/PPP2PPP/R3K2R b KQkq - 0 8",
    "2r3k1/pp3ppp/4p3/3pP3/1P1n4/P4N2/5PPP/2R3K1 w - - 0 24",
    "8/5pk1/6p1/3P4/2K5/8/6PP/8 b - - 0 40",
    "rnb1kbnr/pppp1ppp/8/4p3/4P2q/8/PPPPKPPP/RNBQ1BNR w kq - 2 3",
];

#[test]
fn test_mirrored_position_negates_every_evaluator() {
    for &kind in EvaluatorKind::all() {
        let evaluator = kind.build();
        for fen in MIDDLEGAMES {
            let p = pos(fen);
            let mirrored = p.mirrored().unwrap();
            assert_eq!(
                evaluator.evaluate(&mirrored),
                -evaluator.evaluate(&p),
                "{} on {}",
                kind.name(),
                fen
            );
        }
    }
}

#[test]
fn test_start_position_is_even() {
    let evaluator = HeuristicEvaluator::combined();
    let start = Position::default();

    assert_eq!(evaluator.evaluate(&start), 0.0);
    assert_eq!(evaluator.probability(&start), 0.5);
}

#[test]
fn test_checkmate_scores() {
    let evaluator = HeuristicEvaluator::combined();

    let white_mated = pos(FOOLS_MATE);
    assert_eq!(evaluator.evaluate(&white_mated), -CHECKMATE);
    assert!(evaluator.probability(&white_mated) < 1e-6);

    let black_mated = pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    assert_eq!(evaluator.evaluate(&black_mated), CHECKMATE);
}

#[test]
fn test_draws_score_zero() {
    let evaluator = HeuristicEvaluator::combined();

    // Stalemate with White a queen up
    assert_eq!(evaluator.evaluate(&pos("k7/8/1QK5/8/8/8/8/8 b - - 0 1")), 0.0);
    // Insufficient material
    assert_eq!(evaluator.evaluate(&pos("4k3/8/8/8/8/8/8/3BK3 w - - 0 1")), 0.0);
    // Move-count rule, with White a rook up
    assert_eq!(evaluator.evaluate(&pos("4k3/8/8/8/8/8/8/R3K3 w - - 150 120")), 0.0);
}

#[test]
fn test_extreme_weights_are_clamped() {
    let evaluator = HeuristicEvaluator::new("huge").with_feature(1e6, Material);
    let p = pos("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");

    assert_eq!(evaluator.evaluate(&p), CHECKMATE);
    assert_eq!(clamp_score(f64::NAN), 0.0);
    assert_eq!(clamp_score(-1e9), -CHECKMATE);
}

#[test]
fn test_win_probability_is_monotonic() {
    let scores = [-CHECKMATE, -900.0, -100.0, 0.0, 100.0, 900.0, CHECKMATE];
    let probabilities: Vec<f64> = scores.iter().map(|&s| win_probability(s)).collect();

    assert!(probabilities.windows(2).all(|w| w[0] < w[1]));
    assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
}

#[test]
fn test_evaluator_kind_names_parse_back() {
    for &kind in EvaluatorKind::all() {
        assert_eq!(kind.name().parse::<EvaluatorKind>(), Ok(kind));
    }
    assert!("stockfish".parse::<EvaluatorKind>().is_err());
    assert_eq!(EvaluatorKind::default().build().name(), "combined");
    assert_eq!(EvaluatorKind::PawnStructure.build().name(), "pawn_structure");
}

#[test]
fn test_zero_weight_drops_feature() {
    let evaluator = HeuristicEvaluator::from_weights(FeatureWeights {
        mobility: 0.0,
        ..FeatureWeights::default()
    });
    let breakdown = evaluator.breakdown(Position::default().board());

    assert_eq!(breakdown.len(), 5);
    assert!(breakdown.iter().all(|(name, _)| *name != "mobility"));
}

#[test]
fn test_material_advantage_favors_owner() {
    let evaluator = HeuristicEvaluator::combined();
    let black_up_queen = pos("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1");

    let score = evaluator.evaluate(&black_up_queen);
    assert!(score < -500.0);
    assert_eq!(favored_side(score), Some(Color::Black));
    assert_eq!(favored_side(0.0), None);
}
