// Move ordering for the tree searches

use crate::game_repr::{GamePosition, MoveList};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Order in which negamax visits the moves of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveOrder {
    /// Adapter order
    Natural,
    /// Random order from the injected RNG, natural order without one
    Shuffled,
    /// Captures and promotions first, by MVV-LVA
    #[default]
    Tactical,
}

/// Legal moves of `pos` in the requested order
pub fn order_moves<P: GamePosition>(
    pos: &P,
    order: MoveOrder,
    rng: Option<&mut StdRng>,
) -> MoveList<P::Move> {
    let mut moves = pos.legal_moves();

    match order {
        MoveOrder::Natural => {}
        MoveOrder::Shuffled => {
            if let Some(rng) = rng {
                moves.shuffle(rng);
            }
        }
        MoveOrder::Tactical => sort_by_capture_score(pos, &mut moves),
    }

    moves
}

/// Sort descending by capture score. The sort is stable, so quiet moves
/// keep their natural order behind the tactical ones.
pub fn sort_by_capture_score<P: GamePosition>(pos: &P, moves: &mut MoveList<P::Move>) {
    moves.sort_by_cached_key(|&mv| std::cmp::Reverse(pos.capture_score(mv)));
}

/// Captures and checks only, most valuable victim first
pub fn noisy_moves<P: GamePosition>(pos: &P) -> MoveList<P::Move> {
    let mut moves: MoveList<P::Move> = pos
        .legal_moves()
        .into_iter()
        .filter(|&mv| pos.is_capture(mv) || pos.gives_check(mv))
        .collect();

    sort_by_capture_score(pos, &mut moves);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::Position;
    use rand::SeedableRng;

    #[test]
    fn test_natural_order_matches_generator() {
        let pos = Position::default();
        assert_eq!(order_moves(&pos, MoveOrder::Natural, None), pos.legal_moves());
    }

    #[test]
    fn test_shuffled_without_rng_is_natural() {
        let pos = Position::default();
        assert_eq!(order_moves(&pos, MoveOrder::Shuffled, None), pos.legal_moves());
    }

    #[test]
    fn test_shuffled_is_a_permutation() {
        let pos = Position::default();
        let mut rng = StdRng::seed_from_u64(7);

        let mut shuffled = order_moves(&pos, MoveOrder::Shuffled, Some(&mut rng));
        let mut natural = pos.legal_moves();
        assert_eq!(shuffled.len(), natural.len());

        shuffled.sort_by_key(|mv| mv.to_string());
        natural.sort_by_key(|mv| mv.to_string());
        assert_eq!(shuffled, natural);
    }
}
