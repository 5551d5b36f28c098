//! Game representation consumed by the search engines.
//!
//! The searches never look inside a position. Everything they need (legal
//! moves, copy-make, terminal detection, tactical queries and a stable key)
//! goes through the [`GamePosition`] capability. [`Position`] provides it for
//! chess on top of the `chess` crate's move generator.

mod position;

#[cfg(test)]
mod tests;

pub use position::*;

use crate::error::Result;
use smallvec::SmallVec;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Move list type shared by every search component
pub type MoveList<M> = SmallVec<[M; 64]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// +1 for White, -1 for Black. Converts White-positive scores to the
    /// point of view of this side.
    pub fn sign(&self) -> f64 {
        match self {
            Self::White => 1.0,
            Self::Black => -1.0,
        }
    }
}

/// Game-theoretic state of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move has been mated
    Checkmate,
    /// Stalemate, insufficient material or the move-count rule
    Draw,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Everything the searches need to know about a game position.
///
/// Positions are immutable snapshots: [`GamePosition::apply`] returns the
/// successor instead of mutating in place, so a search node can keep its own
/// copy and parallel workers never share one.
pub trait GamePosition: Clone + Send + Sync {
    type Move: Copy + Eq + Hash + Debug + Display + Send + Sync;

    /// All legal moves, in the adapter's natural order
    fn legal_moves(&self) -> MoveList<Self::Move>;

    /// Play `mv` on a copy of this position
    ///
    /// Fails with `SearchError::InvalidMoveApplication` when the adapter
    /// rejects the move.
    fn apply(&self, mv: Self::Move) -> Result<Self>;

    fn side_to_move(&self) -> Color;

    fn status(&self) -> GameStatus;

    /// Whether the side to move is in check
    fn is_check(&self) -> bool;

    fn is_capture(&self, mv: Self::Move) -> bool;

    fn gives_check(&self, mv: Self::Move) -> bool;

    /// Ordering priority for tactical moves (MVV-LVA). Quiet moves score 0.
    fn capture_score(&self, _mv: Self::Move) -> i32 {
        0
    }

    /// Value of the piece removed by `mv`, 0 for non-captures
    fn victim_value(&self, _mv: Self::Move) -> i32 {
        0
    }

    /// Stable identity of the position for the transposition table
    fn key(&self) -> u64;
}
