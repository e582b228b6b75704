//! Player port - anything that can throw a move each round
//!
//! Implemented by the scripted opponents in [`crate::players`], by the
//! interactive [`HumanPlayer`](crate::players::HumanPlayer), and by
//! [`EntropyBot`](crate::EntropyBot) itself so bots can face each other.

use crate::{Result, rps::Move};

/// Produce the next move given the round index, and consume the move the
/// other side threw.
///
/// # Examples
///
/// ```no_run
/// use rps_entropy::{Move, Result, ports::Player};
///
/// struct AlwaysRock;
///
/// impl Player for AlwaysRock {
///     fn decide_move(&mut self, _round_index: usize) -> Result<Move> {
///         Ok(Move::Rock)
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysRock"
///     }
/// }
/// ```
pub trait Player: Send {
    /// Select a move for round `round_index` (0-based).
    ///
    /// # Errors
    ///
    /// Interactive players fail when their input source is exhausted.
    fn decide_move(&mut self, round_index: usize) -> Result<Move>;

    /// Observe the move the other side threw this round.
    ///
    /// # Default Implementation
    ///
    /// Ignores the move, suitable for players that do not adapt.
    fn observe_opponent_move(&mut self, _opponent_move: Move) -> Result<()> {
        Ok(())
    }

    /// Get the player's name, used in summaries and logs.
    fn name(&self) -> &str;

    /// Seed the player's internal random number generator.
    ///
    /// Match pipelines call this when supplied with a deterministic seed.
    /// Players without randomness can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Return to the state the player was constructed in.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}
