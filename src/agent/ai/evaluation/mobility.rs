// Mobility: legal moves per side, weighted by the moving piece

use super::Feature;
use chess::{
    get_bishop_moves, get_bishop_rays, get_file, get_knight_moves, get_pawn_attacks,
    get_pawn_quiets, get_rook_moves, BitBoard, Board, Color, MoveGen, Piece, Rank, Square, EMPTY,
};

/// Weight of one move by piece type
fn mobility_weight(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 1,
        Piece::Knight | Piece::Bishop => 2,
        Piece::Rook => 3,
        Piece::Queen => 4,
        Piece::King => 0,
    }
}

/// Weighted legal moves for the side to move on `board`
fn legal_mobility(board: &Board) -> i32 {
    MoveGen::new_legal(board)
        .filter_map(|mv| board.piece_on(mv.get_source()))
        .map(mobility_weight)
        .sum()
}

/// Pseudo-legal targets of the non-king piece on `sq`
fn pseudo_targets(board: &Board, sq: Square, piece: Piece, color: Color) -> BitBoard {
    let occupied = *board.combined();
    let enemy = *board.color_combined(!color);

    let targets = match piece {
        Piece::Pawn => get_pawn_attacks(sq, color, enemy) | get_pawn_quiets(sq, color, occupied),
        Piece::Knight => get_knight_moves(sq),
        Piece::Bishop => get_bishop_moves(sq, occupied),
        Piece::Rook => get_rook_moves(sq, occupied),
        Piece::Queen => get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied),
        Piece::King => EMPTY,
    };
    targets & !*board.color_combined(color)
}

/// Weighted pseudo-legal moves for `color`, used when `color` cannot be
/// given the move because the side to move is in check
fn pseudo_legal_mobility(board: &Board, color: Color) -> i32 {
    (*board.color_combined(color))
        .filter_map(|sq| board.piece_on(sq).map(|piece| (sq, piece)))
        .map(|(sq, piece)| pseudo_targets(board, sq, piece, color).popcnt() as i32 * mobility_weight(piece))
        .sum()
}

/// Both sides' mobility. The side not on move is counted on a null-move
/// copy of the board, so the position itself is never touched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mobility;

impl Feature for Mobility {
    fn name(&self) -> &'static str {
        "mobility"
    }

    fn score(&self, board: &Board) -> i32 {
        let to_move = board.side_to_move();
        let ours = legal_mobility(board);
        let theirs = match board.null_move() {
            Some(toggled) => legal_mobility(&toggled),
            None => pseudo_legal_mobility(board, !to_move),
        };

        match to_move {
            Color::White => ours - theirs,
            Color::Black => theirs - ours,
        }
    }
}

/// Activity weights in hundredths of a pawn
fn activity_weight(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 10,
        Piece::Knight | Piece::Bishop => 30,
        Piece::Rook => 35,
        Piece::Queen => 40,
        Piece::King => 0,
    }
}

const CENTRAL_DESTINATION_BONUS: i32 = 10;
const DEVELOPED_MINOR_BONUS: i32 = 20;
const OPEN_FILE_BONUS: i32 = 30;
const DIAGONAL_SQUARE_BONUS: i32 = 2;

/// Source and destination of every non-king move `color` could make.
/// Legal when `color` can be given the move, pseudo-legal otherwise.
fn moves_for(board: &Board, color: Color) -> Vec<(Square, Square)> {
    let legal = |b: &Board| -> Vec<(Square, Square)> {
        MoveGen::new_legal(b)
            .map(|mv| (mv.get_source(), mv.get_dest()))
            .filter(|&(from, _)| b.piece_on(from) != Some(Piece::King))
            .collect()
    };

    if board.side_to_move() == color {
        return legal(board);
    }
    match board.null_move() {
        Some(toggled) => legal(&toggled),
        None => (*board.color_combined(color))
            .filter_map(|sq| board.piece_on(sq).map(|piece| (sq, piece)))
            .flat_map(|(sq, piece)| pseudo_targets(board, sq, piece, color).map(move |to| (sq, to)))
            .collect(),
    }
}

fn is_central(sq: Square) -> bool {
    (2..=5).contains(&sq.get_file().to_index()) && (2..=5).contains(&sq.get_rank().to_index())
}

/// Activity of one side in hundredths of a pawn
fn side_activity(board: &Board, color: Color) -> i32 {
    let enemy = *board.color_combined(!color);
    let pawns = *board.pieces(Piece::Pawn);
    let home_rank = match color {
        Color::White => Rank::First,
        Color::Black => Rank::Eighth,
    };

    let mut score = 0;
    for (from, to) in moves_for(board, color) {
        let Some(piece) = board.piece_on(from) else { continue };
        score += activity_weight(piece);
        if is_central(to) {
            score += CENTRAL_DESTINATION_BONUS;
        }
        if enemy & BitBoard::from_square(to) != EMPTY {
            if let Some(target) = board.piece_on(to) {
                score += (activity_weight(target) - activity_weight(piece)).max(0);
            }
        }
    }

    for sq in *board.color_combined(color) {
        match board.piece_on(sq) {
            Some(Piece::Knight) | Some(Piece::Bishop) if sq.get_rank() != home_rank => {
                score += DEVELOPED_MINOR_BONUS;
            }
            _ => {}
        }
        match board.piece_on(sq) {
            Some(Piece::Rook) | Some(Piece::Queen) if pawns & get_file(sq.get_file()) == EMPTY => {
                score += OPEN_FILE_BONUS;
            }
            _ => {}
        }
        if matches!(board.piece_on(sq), Some(Piece::Bishop) | Some(Piece::Queen)) {
            score += DIAGONAL_SQUARE_BONUS * get_bishop_rays(sq).popcnt() as i32;
        }
    }

    score
}

/// Mobility with the extras of the standalone mobility evaluator: attacks on
/// more valuable pieces, moves into the center, developed minors, rooks and
/// queens on pawnless files, and diagonal reach of bishops and queens.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieceActivity;

impl Feature for PieceActivity {
    fn name(&self) -> &'static str {
        "activity"
    }

    fn score(&self, board: &Board) -> i32 {
        // Truncation toward zero keeps the score antisymmetric
        (side_activity(board, Color::White) - side_activity(board, Color::Black)) / 10
    }
}
