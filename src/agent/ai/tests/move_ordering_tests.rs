// Tactical ordering and the quiescence move filter

use super::pos;
use crate::agent::ai::move_ordering::{noisy_moves, order_moves, MoveOrder};
use crate::game_repr::GamePosition;

fn names(moves: &[chess::ChessMove]) -> Vec<String> {
    moves.iter().map(|mv| mv.to_string()).collect()
}

#[test]
fn test_capture_ordered_first() {
    let p = pos("4k3/8/8/3q4/8/4N3/8/4K3 w - - 0 1");
    let moves = order_moves(&p, MoveOrder::Tactical, None);

    assert_eq!(moves[0].to_string(), "e3d5");
    assert_eq!(moves.len(), p.legal_moves().len());
}

#[test]
fn test_cheaper_attacker_first() {
    // Pawn and queen can both take the rook
    let p = pos("4k3/8/8/3r4/2P5/8/3Q4/4K3 w - - 0 1");
    let moves = names(&order_moves(&p, MoveOrder::Tactical, None));

    assert_eq!(moves[0], "c4d5");
    assert_eq!(moves[1], "d2d5");
}

#[test]
fn test_queen_promotion_first() {
    let p = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let moves = names(&order_moves(&p, MoveOrder::Tactical, None));

    assert_eq!(moves[0], "a7a8q");
    assert!(moves[1..4].iter().all(|mv| mv.starts_with("a7a8")));
}

#[test]
fn test_quiet_moves_keep_natural_order() {
    let p = pos("4k3/8/8/3r4/2P5/8/3Q4/4K3 w - - 0 1");

    let quiet = |moves: Vec<chess::ChessMove>| -> Vec<String> {
        names(&moves.into_iter().filter(|&mv| !p.is_capture(mv)).collect::<Vec<_>>())
    };

    let tactical = quiet(order_moves(&p, MoveOrder::Tactical, None).to_vec());
    let natural = quiet(p.legal_moves().to_vec());
    assert_eq!(tactical, natural);
}

#[test]
fn test_start_position_has_no_noisy_moves() {
    assert!(noisy_moves(&pos(crate::game_repr::START_FEN)).is_empty());
}

#[test]
fn test_noisy_moves_are_captures_or_checks() {
    let p = pos("4k3/8/8/3r4/2P5/8/3Q4/4K3 w - - 0 1");
    let noisy = noisy_moves(&p);

    assert_eq!(noisy[0].to_string(), "c4d5");
    assert!(noisy.iter().all(|&mv| p.is_capture(mv) || p.gives_check(mv)));
    // Qe2+ is quiet but checks
    assert!(names(&noisy).contains(&"d2e2".to_string()));
}
