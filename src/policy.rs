//! Decision policies
//!
//! A policy turns the current [`BeliefState`] into a move. Policies never
//! mutate beliefs: they borrow them immutably and only consume draws from the
//! caller's RNG stream, so the same beliefs, round and RNG state always
//! produce the same move.

pub mod entropy;
pub mod frequency;

use std::{fmt, str::FromStr};

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

pub use entropy::EntropySoftmaxPolicy;
pub use frequency::FrequencyPolicy;

use crate::{
    app::BotConfig,
    beliefs::BeliefState,
    rps::{MOVE_COUNT, Move},
};

/// Position of a decision within the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundContext {
    /// Zero-based index of the round about to be played
    pub round_index: usize,
    /// Planned session length (the same `N` used to size the window)
    pub total_rounds: usize,
}

impl RoundContext {
    pub fn new(round_index: usize, total_rounds: usize) -> Self {
        Self {
            round_index,
            total_rounds,
        }
    }
}

/// Linearly declining exploration rate with a floor:
/// `ε = max(floor, initial · (1 − round / total))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSchedule {
    pub initial: f64,
    pub floor: f64,
}

impl ExplorationSchedule {
    pub fn new(initial: f64, floor: f64) -> Self {
        Self { initial, floor }
    }

    /// Constant rate (no decline).
    pub fn constant(rate: f64) -> Self {
        Self {
            initial: rate,
            floor: rate,
        }
    }

    /// Exploration probability for a round. A zero-length session has no
    /// progress fraction, so it sits at the floor.
    pub fn rate(&self, round: RoundContext) -> f64 {
        if round.total_rounds == 0 {
            return self.floor;
        }
        let progress = round.round_index as f64 / round.total_rounds as f64;
        self.floor.max(self.initial * (1.0 - progress))
    }
}

impl Default for ExplorationSchedule {
    fn default() -> Self {
        Self {
            initial: 0.25,
            floor: 0.1,
        }
    }
}

/// Why a move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionReason {
    /// Opening rounds are played uniformly at random
    Warmup,
    /// Exploration roll came up
    Explore,
    /// Sampled from the exploitation distribution
    Exploit,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DecisionReason::Warmup => "warm-up",
            DecisionReason::Explore => "explore",
            DecisionReason::Exploit => "exploit",
        };
        f.write_str(label)
    }
}

/// Everything a policy derives from the beliefs before drawing any random
/// number. Pure function of beliefs and round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEstimate {
    /// Estimated opponent distribution the policy exploits
    pub probs: [f64; MOVE_COUNT],
    /// Entropy of `probs` in bits
    pub entropy: f64,
    /// log2(3)
    pub max_entropy: f64,
    /// Softmax inverse temperature, when the policy uses one
    pub beta: Option<f64>,
    /// Exploration probability for this round
    pub exploration: f64,
    /// Per-move expected utility
    pub utilities: [f64; MOVE_COUNT],
    /// Distribution sampled on the exploitation branch
    pub action_probs: [f64; MOVE_COUNT],
    /// Whether the round falls inside the warm-up
    pub warmup: bool,
    /// Whether `action_probs` had to fall back to uniform
    pub fallback: bool,
}

/// A chosen move together with the reasoning behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub chosen: Move,
    pub reason: DecisionReason,
    pub estimate: PolicyEstimate,
}

/// Strategy interface shared by every bot revision.
pub trait DecisionPolicy: Send + fmt::Debug {
    /// Which strategy this is
    fn kind(&self) -> PolicyKind;

    /// Derive the policy's view of the beliefs without consuming randomness.
    fn estimate(&self, beliefs: &BeliefState, round: RoundContext) -> PolicyEstimate;

    /// Pick a move. Only `rng` is advanced.
    fn decide(&self, beliefs: &BeliefState, round: RoundContext, rng: &mut StdRng) -> Decision;
}

/// Closed set of available strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Entropy-gated softmax over smoothed, decayed beliefs
    #[default]
    EntropySoftmax,
    /// Fixed-ε greedy play against raw frequencies
    Frequency,
}

impl PolicyKind {
    /// Build the boxed policy described by `config`.
    pub fn into_boxed_policy(self, config: &BotConfig) -> Box<dyn DecisionPolicy> {
        match self {
            PolicyKind::EntropySoftmax => Box::new(EntropySoftmaxPolicy::from_config(config)),
            PolicyKind::Frequency => Box::new(FrequencyPolicy::from_config(config)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PolicyKind::EntropySoftmax => "entropy-softmax",
            PolicyKind::Frequency => "frequency",
        };
        f.write_str(label)
    }
}

impl FromStr for PolicyKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entropy" | "entropy-softmax" | "softmax" => Ok(PolicyKind::EntropySoftmax),
            "frequency" | "greedy" => Ok(PolicyKind::Frequency),
            _ => Err(crate::Error::ParsePolicyKind {
                input: s.to_string(),
                expected: "entropy-softmax, frequency".to_string(),
            }),
        }
    }
}

/// Net expected payoff of each move against `probs`: the chance of beating
/// the opponent minus the chance of losing to it.
pub fn net_utilities(probs: [f64; MOVE_COUNT]) -> [f64; MOVE_COUNT] {
    Move::ALL.map(|mv| probs[mv.beats().index()] - probs[mv.beaten_by().index()])
}

/// Chance of each move beating the opponent under `probs`.
pub fn win_probabilities(probs: [f64; MOVE_COUNT]) -> [f64; MOVE_COUNT] {
    Move::ALL.map(|mv| probs[mv.beats().index()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exploration_declines_to_floor() {
        let schedule = ExplorationSchedule::default();
        assert!((schedule.rate(RoundContext::new(0, 20)) - 0.25).abs() < 1e-12);
        assert!((schedule.rate(RoundContext::new(10, 20)) - 0.125).abs() < 1e-12);
        assert!((schedule.rate(RoundContext::new(18, 20)) - 0.1).abs() < 1e-12);
        assert!((schedule.rate(RoundContext::new(0, 0)) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn net_utilities_follow_dominance() {
        let eu = net_utilities([0.5, 0.3, 0.2]);
        // Rock: S - P, Paper: R - S, Scissors: P - R
        assert!((eu[0] - (0.2 - 0.3)).abs() < 1e-12);
        assert!((eu[1] - (0.5 - 0.2)).abs() < 1e-12);
        assert!((eu[2] - (0.3 - 0.5)).abs() < 1e-12);
        assert!(eu.iter().sum::<f64>().abs() < 1e-12);
    }

    #[test]
    fn win_probabilities_point_at_the_counter() {
        let wins = win_probabilities([0.6, 0.3, 0.1]);
        // Paper beats the likely Rock
        assert_eq!(wins, [0.1, 0.6, 0.3]);
    }

    #[test]
    fn policy_kind_parses_aliases() {
        assert_eq!(
            "softmax".parse::<PolicyKind>().unwrap(),
            PolicyKind::EntropySoftmax
        );
        assert_eq!("Greedy".parse::<PolicyKind>().unwrap(), PolicyKind::Frequency);
        assert!("mcts".parse::<PolicyKind>().is_err());
    }
}
