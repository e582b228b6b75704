//! Round outcomes and running score

use serde::{Deserialize, Serialize};

use super::moves::{MOVE_COUNT, Move};

/// Outcome of a single round, from the perspective of the first move passed
/// to [`RoundOutcome::resolve`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win,
    Loss,
    Tie,
}

impl RoundOutcome {
    /// Score `ours` against `theirs` using the cyclic dominance rule.
    pub fn resolve(ours: Move, theirs: Move) -> Self {
        if ours == theirs {
            RoundOutcome::Tie
        } else if ours.defeats(theirs) {
            RoundOutcome::Win
        } else {
            RoundOutcome::Loss
        }
    }

    /// Same round seen from the other side of the table.
    pub fn swap_perspective(self) -> Self {
        match self {
            RoundOutcome::Win => RoundOutcome::Loss,
            RoundOutcome::Loss => RoundOutcome::Win,
            RoundOutcome::Tie => RoundOutcome::Tie,
        }
    }

    /// Points awarded to the perspective side (+1 per won round).
    pub fn points(self) -> u32 {
        match self {
            RoundOutcome::Win => 1,
            RoundOutcome::Loss | RoundOutcome::Tie => 0,
        }
    }
}

/// Running tally of a match between a bot and its opponent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub bot_wins: usize,
    pub opponent_wins: usize,
    pub ties: usize,
    pub bot_moves: [usize; MOVE_COUNT],
    pub opponent_moves: [usize; MOVE_COUNT],
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one round and return its outcome from the bot's side.
    pub fn record(&mut self, bot_move: Move, opponent_move: Move) -> RoundOutcome {
        let outcome = RoundOutcome::resolve(bot_move, opponent_move);
        match outcome {
            RoundOutcome::Win => self.bot_wins += 1,
            RoundOutcome::Loss => self.opponent_wins += 1,
            RoundOutcome::Tie => self.ties += 1,
        }
        self.bot_moves[bot_move.index()] += 1;
        self.opponent_moves[opponent_move.index()] += 1;
        outcome
    }

    pub fn rounds(&self) -> usize {
        self.bot_wins + self.opponent_wins + self.ties
    }
}
