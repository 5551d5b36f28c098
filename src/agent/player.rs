//! Player trait for move-selection engines.
//!
//! A player is anything that, given a position, answers with the move it
//! wants to play. Both search engines implement it, so callers can hold a
//! `Box<dyn Player<Position>>` and swap engines freely.
//!
//! # Design Philosophy
//!
//! The trait focuses on **behavior** rather than construction. Each engine
//! takes different settings, so there is no constructor in the trait; every
//! implementation provides its own, and the [`AIType`] factory builds the
//! usual presets.
//!
//! # Synchronous Design
//!
//! `get_move()` blocks until the search finishes. Searches are bounded by
//! iteration or depth budgets, never by time.
//!
//! [`AIType`]: crate::agent::ai::AIType

use crate::error::Result;
use crate::game_repr::GamePosition;

/// Trait for entities that can provide moves.
///
/// # Method Behavior
///
/// ## `get_move()`
/// - **Blocking**: returns once the search budget is spent
/// - **`Err(SearchError::NoLegalMoves)`**: the position is already decided,
///   by mate, stalemate or a draw rule, even if the board still has moves
/// - **`Ok(mv)`**: a move legal in `position`
///
/// ## `name()`
/// - A display name for logs and the command line
pub trait Player<P: GamePosition> {
    /// Choose a move for the side to move in `position`
    fn get_move(&mut self, position: &P) -> Result<P::Move>;

    fn name(&self) -> &str;
}
