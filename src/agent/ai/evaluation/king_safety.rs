// King safety: pawn shield, open files, direct attackers and nearby enemy
// pieces, faded out as the board empties

use super::{attackers_of, Feature};
use crate::game_repr::pieces_of;
use chess::{BitBoard, Board, Color, File, Piece, Rank, Square};

const PAWN_SHIELD_BONUS: i32 = 10;
const KING_ATTACKER_PENALTY: i32 = 20;
const OPEN_FILE_PENALTY: i32 = 15;

/// Full weight while at least this many pieces (kings included) remain
const FULL_PHASE_PIECES: i32 = 32;

/// Pressure of an enemy piece within two squares of the king
fn proximity_weight(piece: Piece) -> i32 {
    match piece {
        Piece::Queen => 40,
        Piece::Rook => 25,
        Piece::Bishop | Piece::Knight => 15,
        Piece::Pawn => 5,
        Piece::King => 0,
    }
}

fn square_at(file: i32, rank: i32) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square::make_square(Rank::from_index(rank as usize), File::from_index(file as usize)))
    } else {
        None
    }
}

/// Own pawns on the king's file and its neighbours, up to two ranks ahead
fn pawn_shield(board: &Board, king: Square, color: Color) -> i32 {
    let own_pawns = pieces_of(board, Piece::Pawn, color);
    let file = king.get_file().to_index() as i32;
    let rank = king.get_rank().to_index() as i32;
    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };

    let mut shield = 0;
    for f in file - 1..=file + 1 {
        for step in 1..=2 {
            if let Some(sq) = square_at(f, rank + forward * step) {
                if own_pawns & BitBoard::from_square(sq) != chess::EMPTY {
                    shield += PAWN_SHIELD_BONUS;
                }
            }
        }
    }
    shield
}

/// Files next to the king without a pawn of either color
fn open_files_near(board: &Board, king: Square) -> i32 {
    let pawns = *board.pieces(Piece::Pawn);
    let file = king.get_file().to_index() as i32;

    (file - 1..=file + 1)
        .filter(|f| (0..8).contains(f))
        .filter(|&f| pawns & chess::get_file(File::from_index(f as usize)) == chess::EMPTY)
        .count() as i32
}

fn enemy_proximity(board: &Board, king: Square, color: Color) -> i32 {
    let king_file = king.get_file().to_index() as i32;
    let king_rank = king.get_rank().to_index() as i32;
    let enemies = *board.color_combined(!color);

    enemies
        .filter(|sq| {
            let df = (sq.get_file().to_index() as i32 - king_file).abs();
            let dr = (sq.get_rank().to_index() as i32 - king_rank).abs();
            df.max(dr) <= 2
        })
        .filter_map(|sq| board.piece_on(sq))
        .map(proximity_weight)
        .sum()
}

/// Safety of one king, positive is good for `color`
fn king_safety(board: &Board, color: Color) -> i32 {
    let king = board.king_square(color);
    let attackers = attackers_of(board, king, !color).popcnt() as i32;

    pawn_shield(board, king, color)
        - attackers * KING_ATTACKER_PENALTY
        - open_files_near(board, king) * OPEN_FILE_PENALTY
        - enemy_proximity(board, king, color)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KingSafety;

impl Feature for KingSafety {
    fn name(&self) -> &'static str {
        "king_safety"
    }

    fn score(&self, board: &Board) -> i32 {
        let raw = king_safety(board, Color::White) - king_safety(board, Color::Black);
        let pieces = (board.combined().popcnt() as i32).min(FULL_PHASE_PIECES);

        // Truncating division keeps the sign symmetric
        raw * pieces / FULL_PHASE_PIECES
    }
}
