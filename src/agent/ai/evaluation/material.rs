// Material balance with a separate endgame value table

use super::Feature;
use crate::game_repr::pieces_of;
use chess::{Board, Color, Piece};

// Material values in centipawns
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;

// Endgame values: pawns and rooks gain, knights lose
const PAWN_VALUE_EG: i32 = 150;
const KNIGHT_VALUE_EG: i32 = 280;
const BISHOP_VALUE_EG: i32 = 350;
const ROOK_VALUE_EG: i32 = 525;
const QUEEN_VALUE_EG: i32 = 1000;

/// Get material value for a piece type in the given phase
pub fn piece_value(piece: Piece, endgame: bool) -> i32 {
    match (piece, endgame) {
        (Piece::Pawn, false) => PAWN_VALUE,
        (Piece::Knight, false) => KNIGHT_VALUE,
        (Piece::Bishop, false) => BISHOP_VALUE,
        (Piece::Rook, false) => ROOK_VALUE,
        (Piece::Queen, false) => QUEEN_VALUE,
        (Piece::Pawn, true) => PAWN_VALUE_EG,
        (Piece::Knight, true) => KNIGHT_VALUE_EG,
        (Piece::Bishop, true) => BISHOP_VALUE_EG,
        (Piece::Rook, true) => ROOK_VALUE_EG,
        (Piece::Queen, true) => QUEEN_VALUE_EG,
        (Piece::King, _) => 0,
    }
}

/// No queens left, or both queens with at most four other pieces
pub fn is_endgame(board: &Board) -> bool {
    let queens = board.pieces(Piece::Queen).popcnt();
    let minors_and_rooks = (*board.pieces(Piece::Knight)
        | *board.pieces(Piece::Bishop)
        | *board.pieces(Piece::Rook))
    .popcnt();

    queens == 0 || (queens == 2 && minors_and_rooks <= 4)
}

/// Counts material, switching value tables once the endgame starts
#[derive(Debug, Clone, Copy, Default)]
pub struct Material;

impl Feature for Material {
    fn name(&self) -> &'static str {
        "material"
    }

    fn score(&self, board: &Board) -> i32 {
        let endgame = is_endgame(board);

        [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
            .iter()
            .map(|&piece| {
                let white = pieces_of(board, piece, Color::White).popcnt() as i32;
                let black = pieces_of(board, piece, Color::Black).popcnt() as i32;
                (white - black) * piece_value(piece, endgame)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_starting_position_is_level() {
        assert_eq!(Material.score(&Board::default()), 0);
        assert!(!is_endgame(&Board::default()));
    }

    #[test]
    fn test_extra_queen() {
        let board = Board::from_str("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        // Black has no queen, so only one queen is left on the board
        assert!(!is_endgame(&board));
        assert_eq!(Material.score(&board), QUEEN_VALUE);
    }

    #[test]
    fn test_endgame_values() {
        let board = Board::from_str("4k3/8/8/8/8/8/4P3/R3K3 w - - 0 1").unwrap();
        assert!(is_endgame(&board));
        assert_eq!(Material.score(&board), PAWN_VALUE_EG + ROOK_VALUE_EG);
    }
}
