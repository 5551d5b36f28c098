use chess_search::agent::ai::{
    Difficulty, EvaluatorKind, Evaluator, HeuristicEvaluator, MCTSConfig, NegamaxPlayer,
    TranspositionTable,
};
use chess_search::agent::{MCTSPlayer, Player};
use chess_search::game_repr::Position;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

const MIDDLEGAME: &str = "r3k2r/ppp2ppp/2n1bn2/3pp3/3PP3/2N1BN2/PPP2PPP/R3K2R b KQkq - 0 8";

fn bench_evaluation(c: &mut Criterion) {
    let pos = Position::from_fen(MIDDLEGAME).unwrap();

    for &kind in EvaluatorKind::all() {
        let evaluator = kind.build();
        c.bench_function(&format!("evaluate {}", kind.name()), |b| {
            b.iter(|| black_box(evaluator.evaluate(black_box(&pos))))
        });
    }
}

fn bench_negamax(c: &mut Criterion) {
    let pos = Position::from_fen(MIDDLEGAME).unwrap();

    for &difficulty in &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        c.bench_function(&format!("negamax {}", difficulty.name()), |b| {
            b.iter(|| {
                let mut ai = NegamaxPlayer::with_difficulty(difficulty).without_randomness();
                black_box(ai.get_move(&pos).unwrap())
            })
        });
    }
}

fn bench_mcts(c: &mut Criterion) {
    let pos = Position::default();
    let config = MCTSConfig::default().with_iterations(500);

    c.bench_function("mcts 500 iterations", |b| {
        b.iter(|| {
            let mut ai = MCTSPlayer::new(config, HeuristicEvaluator::combined(), "bench").with_seed(1);
            black_box(ai.get_move(&pos).unwrap())
        })
    });

    c.bench_function("mcts 500 iterations, 4 trees", |b| {
        b.iter(|| {
            let mut ai = MCTSPlayer::new(config.with_threads(4), HeuristicEvaluator::combined(), "bench")
                .with_seed(1);
            black_box(ai.get_move(&pos).unwrap())
        })
    });

    // Cache kept warm across iterations
    let cache = Arc::new(TranspositionTable::new());
    c.bench_function("mcts 500 iterations, shared cache", |b| {
        b.iter(|| {
            let mut ai = MCTSPlayer::new(config, HeuristicEvaluator::combined(), "bench")
                .with_seed(1)
                .with_cache(Arc::clone(&cache));
            black_box(ai.get_move(&pos).unwrap())
        })
    });
}

criterion_group!(benches, bench_evaluation, bench_negamax, bench_mcts);
criterion_main!(benches);
