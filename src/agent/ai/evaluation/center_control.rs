// Control of d4, e4, d5 and e5

use super::{attackers_of, Feature};
use chess::{Board, Color, Square};

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

const OCCUPANCY_BONUS: i32 = 20;
const ATTACKER_BONUS: i32 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct CenterControl;

impl Feature for CenterControl {
    fn name(&self) -> &'static str {
        "center_control"
    }

    fn score(&self, board: &Board) -> i32 {
        CENTER
            .iter()
            .map(|&sq| {
                let occupancy = match board.color_on(sq) {
                    Some(Color::White) => OCCUPANCY_BONUS,
                    Some(Color::Black) => -OCCUPANCY_BONUS,
                    None => 0,
                };
                let white = attackers_of(board, sq, Color::White).popcnt() as i32;
                let black = attackers_of(board, sq, Color::Black).popcnt() as i32;

                occupancy + (white - black) * ATTACKER_BONUS
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_start_position_is_level() {
        assert_eq!(CenterControl.score(&Board::default()), 0);
    }

    #[test]
    fn test_central_pawn() {
        // After 1. e4 White occupies e4 and the pawn eyes d5
        let b = Board::from_str("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert!(CenterControl.score(&b) >= OCCUPANCY_BONUS + ATTACKER_BONUS);
    }
}
