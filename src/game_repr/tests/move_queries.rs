// Tactical move queries used by ordering and quiescence

use super::*;
use crate::error::SearchError;

#[test]
fn test_pawn_move_resets_clock() {
    let p = pos("4k3/8/8/8/8/8/4P3/4K3 w - - 12 40");
    let after = p.apply(mv(Square::E2, Square::E4)).unwrap();
    assert_eq!(after.halfmove_clock(), 0);

    let after = p.apply(mv(Square::E1, Square::D1)).unwrap();
    assert_eq!(after.halfmove_clock(), 13);
}

#[test]
fn test_illegal_move_is_rejected() {
    let err = Position::default().apply(mv(Square::E2, Square::E5)).unwrap_err();
    match err {
        SearchError::InvalidMoveApplication { mv } => assert_eq!(mv, "e2e5"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_capture_detection() {
    let p = pos("rnb1kbnr/pppppppp/8/8/4q3/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1");
    let capture = mv(Square::C3, Square::E4);
    let quiet = mv(Square::G1, Square::F3);

    assert!(p.is_capture(capture));
    assert!(!p.is_capture(quiet));
    assert_eq!(p.victim_value(capture), 900);
    assert_eq!(p.victim_value(quiet), 0);
    assert!(p.capture_score(capture) > p.capture_score(quiet));
}

#[test]
fn test_en_passant_is_a_capture() {
    let p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let ep = mv(Square::E5, Square::D6);

    assert!(p.legal_moves().contains(&ep));
    assert!(p.is_capture(ep));
    assert_eq!(p.victim_value(ep), 100);
}

#[test]
fn test_mvv_lva_prefers_cheap_attacker() {
    // Both the pawn and the queen can take the rook on d5
    let p = pos("4k3/8/8/3r4/4P3/8/8/3QK3 w - - 0 1");
    let by_pawn = mv(Square::E4, Square::D5);
    let by_queen = mv(Square::D1, Square::D5);

    assert!(p.capture_score(by_pawn) > p.capture_score(by_queen));
}

#[test]
fn test_gives_check() {
    let p = pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    assert!(p.gives_check(mv(Square::A1, Square::A8)));
    assert!(!p.gives_check(mv(Square::A1, Square::A2)));
}
