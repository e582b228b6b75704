//! Fixed-ε greedy play against raw move frequencies
//!
//! The simplest bot: estimate the opponent by plain lifetime frequencies, and
//! with probability `1 - ε` throw the move that beats the opponent's most
//! likely throw.

use rand::{Rng, rngs::StdRng};

use super::{
    Decision, DecisionPolicy, DecisionReason, PolicyEstimate, PolicyKind, RoundContext,
    win_probabilities,
};
use crate::{
    app::BotConfig,
    beliefs::BeliefState,
    rps::{MOVE_COUNT, Move},
    utils::{max_entropy_bits, shannon_entropy_bits},
};

/// Exploration rate used by the frequency bot
pub const DEFAULT_FREQUENCY_EPSILON: f64 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyPolicy {
    epsilon: f64,
}

impl FrequencyPolicy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(config.frequency_epsilon)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for FrequencyPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY_EPSILON)
    }
}

/// Index of the largest value; the first one wins ties.
fn argmax(values: &[f64; MOVE_COUNT]) -> usize {
    let mut best = 0;
    for (idx, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}

impl DecisionPolicy for FrequencyPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Frequency
    }

    fn estimate(&self, beliefs: &BeliefState, _round: RoundContext) -> PolicyEstimate {
        let probs = beliefs.empirical_probs();
        let utilities = win_probabilities(probs);
        let mut action_probs = [0.0; MOVE_COUNT];
        action_probs[argmax(&utilities)] = 1.0;

        PolicyEstimate {
            probs,
            entropy: shannon_entropy_bits(probs),
            max_entropy: max_entropy_bits(MOVE_COUNT),
            beta: None,
            exploration: self.epsilon,
            utilities,
            action_probs,
            warmup: false,
            fallback: false,
        }
    }

    fn decide(&self, beliefs: &BeliefState, round: RoundContext, rng: &mut StdRng) -> Decision {
        let estimate = self.estimate(beliefs, round);

        if rng.random::<f64>() < estimate.exploration {
            return Decision {
                chosen: Move::random(rng),
                reason: DecisionReason::Explore,
                estimate,
            };
        }

        let chosen = Move::from_index(argmax(&estimate.utilities)).unwrap_or(Move::Rock);
        Decision {
            chosen,
            reason: DecisionReason::Exploit,
            estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn exploits_the_most_frequent_move() {
        let mut beliefs = BeliefState::new(3, 0.98);
        for mv in [Move::Scissors, Move::Scissors, Move::Rock] {
            beliefs.update(mv);
        }
        let policy = FrequencyPolicy::new(0.0);
        let mut rng = StdRng::seed_from_u64(3);
        for round in 0..10 {
            let decision = policy.decide(&beliefs, RoundContext::new(round, 10), &mut rng);
            assert_eq!(decision.chosen, Move::Rock);
            assert_eq!(decision.reason, DecisionReason::Exploit);
        }
    }

    #[test]
    fn ties_resolve_to_the_first_move() {
        let beliefs = BeliefState::new(3, 0.98);
        let estimate = FrequencyPolicy::default().estimate(&beliefs, RoundContext::new(0, 10));
        assert_eq!(estimate.action_probs, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn always_explores_at_full_epsilon() {
        let beliefs = BeliefState::new(3, 0.98);
        let policy = FrequencyPolicy::new(1.0);
        let mut rng = StdRng::seed_from_u64(11);
        for round in 0..20 {
            let decision = policy.decide(&beliefs, RoundContext::new(round, 20), &mut rng);
            assert_eq!(decision.reason, DecisionReason::Explore);
        }
    }
}
