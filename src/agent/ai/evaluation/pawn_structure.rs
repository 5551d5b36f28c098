// Pawn structure: doubled, isolated, backward and passed pawns, plus chains

use super::Feature;
use crate::game_repr::pieces_of;
use chess::{get_pawn_attacks, BitBoard, Board, Color, Piece, Square};
use once_cell::sync::Lazy;

const DOUBLED_PAWN_PENALTY: i32 = 30;
const ISOLATED_PAWN_PENALTY: i32 = 20;
const BACKWARD_PAWN_PENALTY: i32 = 15;
const PASSED_PAWN_BASE: i32 = 50;
const PASSED_PAWN_PER_RANK: i32 = 10;
const PAWN_CHAIN_BONUS: i32 = 10;

/// Precomputed per-square masks. Color index 0 is White, 1 is Black.
struct PawnMasks {
    files: [u64; 8],
    adjacent_files: [u64; 8],
    /// Own and adjacent files, strictly in front of the square
    passed_span: [[u64; 64]; 2],
    /// Same file, strictly in front of the square
    front_file: [[u64; 64]; 2],
    /// Adjacent files, strictly behind the square
    support_span: [[u64; 64]; 2],
}

impl PawnMasks {
    fn generate() -> Self {
        let mut files = [0u64; 8];
        for sq in 0..64 {
            files[sq % 8] |= 1u64 << sq;
        }

        let mut adjacent_files = [0u64; 8];
        for file in 0..8 {
            if file > 0 {
                adjacent_files[file] |= files[file - 1];
            }
            if file < 7 {
                adjacent_files[file] |= files[file + 1];
            }
        }

        let mut passed_span = [[0u64; 64]; 2];
        let mut front_file = [[0u64; 64]; 2];
        let mut support_span = [[0u64; 64]; 2];

        for sq in 0..64 {
            let (file, rank) = (sq % 8, sq / 8);
            for other in 0..64usize {
                let (other_file, other_rank) = (other % 8, other / 8);
                let bit = 1u64 << other;
                let near_file = other_file.abs_diff(file) <= 1;
                let adjacent = other_file.abs_diff(file) == 1;

                if near_file && other_rank > rank {
                    passed_span[0][sq] |= bit;
                }
                if near_file && other_rank < rank {
                    passed_span[1][sq] |= bit;
                }
                if other_file == file && other_rank > rank {
                    front_file[0][sq] |= bit;
                }
                if other_file == file && other_rank < rank {
                    front_file[1][sq] |= bit;
                }
                if adjacent && other_rank < rank {
                    support_span[0][sq] |= bit;
                }
                if adjacent && other_rank > rank {
                    support_span[1][sq] |= bit;
                }
            }
        }

        Self {
            files,
            adjacent_files,
            passed_span,
            front_file,
            support_span,
        }
    }
}

static MASKS: Lazy<PawnMasks> = Lazy::new(PawnMasks::generate);

/// Evaluate the pawns of one side, positive is good for `color`
fn evaluate_pawns(board: &Board, color: Color) -> i32 {
    let own = pieces_of(board, Piece::Pawn, color);
    let enemy = pieces_of(board, Piece::Pawn, !color).0;
    let side = color.to_index();
    let mut score = 0;

    for sq in own {
        let idx = sq.to_index();
        let file = sq.get_file().to_index();
        let rank = sq.get_rank().to_index() as i32;

        if (own.0 & MASKS.files[file]).count_ones() > 1 {
            score -= DOUBLED_PAWN_PENALTY;
        }

        if own.0 & MASKS.adjacent_files[file] == 0 {
            score -= ISOLATED_PAWN_PENALTY;
        }

        // Blocked by an enemy pawn on its file with no friendly pawn behind
        // on an adjacent file to come up in support
        if enemy & MASKS.front_file[side][idx] != 0 && own.0 & MASKS.support_span[side][idx] == 0 {
            score -= BACKWARD_PAWN_PENALTY;
        }

        if is_passed_pawn(board, sq, color) {
            let advancement = match color {
                Color::White => rank,
                Color::Black => 7 - rank,
            };
            score += PASSED_PAWN_BASE + PASSED_PAWN_PER_RANK * advancement;
        }

        score += PAWN_CHAIN_BONUS * defenders(sq, color, own).popcnt() as i32;
    }

    score
}

/// Friendly pawns defending `sq`
fn defenders(sq: Square, color: Color, own_pawns: BitBoard) -> BitBoard {
    // A pawn of the other color on `sq` would attack exactly our defenders
    get_pawn_attacks(sq, !color, own_pawns)
}

/// Whether the pawn of `color` on `sq` has no enemy pawn ahead of it
pub fn is_passed_pawn(board: &Board, sq: Square, color: Color) -> bool {
    let enemy = pieces_of(board, Piece::Pawn, !color).0;
    enemy & MASKS.passed_span[color.to_index()][sq.to_index()] == 0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PawnStructure;

impl Feature for PawnStructure {
    fn name(&self) -> &'static str {
        "pawn_structure"
    }

    fn score(&self, board: &Board) -> i32 {
        evaluate_pawns(board, Color::White) - evaluate_pawns(board, Color::Black)
    }
}
