//! Observer port - abstraction for watching a match as it is played
//!
//! Observers collect or display round results without coupling the match
//! loop to any output format.

use crate::{
    Result,
    pipeline::{MatchResult, RoundRecord},
};

/// Observer trait for monitoring matches
///
/// # Event Sequence
///
/// 1. `on_match_start(total_rounds, bot, opponent)` - once per match
/// 2. `on_round_end(record)` - after each round is scored and both sides have
///    seen the other's move
/// 3. `on_match_end(result)` - once per match
///
/// # Examples
///
/// ```no_run
/// use rps_entropy::{pipeline::RoundRecord, ports::Observer, rps::RoundOutcome};
///
/// struct WinCounter {
///     wins: usize,
/// }
///
/// impl Observer for WinCounter {
///     fn on_round_end(&mut self, record: &RoundRecord) -> rps_entropy::Result<()> {
///         if record.outcome == RoundOutcome::Win {
///             self.wins += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called before the first round of a match.
    fn on_match_start(&mut self, _total_rounds: usize, _bot: &str, _opponent: &str) -> Result<()> {
        Ok(())
    }

    /// Called after every round.
    fn on_round_end(&mut self, _record: &RoundRecord) -> Result<()> {
        Ok(())
    }

    /// Called once the configured number of rounds has been played.
    fn on_match_end(&mut self, _result: &MatchResult) -> Result<()> {
        Ok(())
    }
}
