pub mod player;
pub use player::*;

pub mod mcts_player;
pub use mcts_player::MCTSPlayer;

pub mod ai;
pub use ai::{AIType, Difficulty, NegamaxPlayer, SearchResult, TranspositionTable};

use log::warn;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

/// RNG seeded from the operating system. Searches degrade to deterministic
/// choices when the OS source is unavailable.
pub(crate) fn random_rng() -> Option<StdRng> {
    match StdRng::from_rng(OsRng) {
        Ok(rng) => Some(rng),
        Err(err) => {
            warn!("OS random source unavailable ({}), searching without randomness", err);
            None
        }
    }
}
