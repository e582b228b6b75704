//! Entropy-gated softmax policy
//!
//! Confidence in the opponent model is read off the entropy of the smoothed
//! estimate: a predictable opponent (low entropy) pushes the inverse
//! temperature towards `beta_max` and the softmax towards the best counter; an
//! unpredictable one drives it to zero and the softmax towards uniform.

use log::{debug, warn};
use rand::{Rng, rngs::StdRng};

use super::{
    Decision, DecisionPolicy, DecisionReason, ExplorationSchedule, PolicyEstimate, PolicyKind,
    RoundContext, net_utilities,
};
use crate::{
    app::BotConfig,
    beliefs::{BeliefState, window::warmup_rounds},
    rps::{MOVE_COUNT, Move},
    utils::{max_entropy_bits, sample_index, shannon_entropy_bits, softmax},
};

#[derive(Debug, Clone, PartialEq)]
pub struct EntropySoftmaxPolicy {
    prior: f64,
    beta_max: f64,
    exploration: ExplorationSchedule,
    recent_blend: Option<f64>,
}

impl EntropySoftmaxPolicy {
    /// Policy with Laplace prior `prior` and maximum inverse temperature
    /// `beta_max`, using the default exploration schedule and no recent blend.
    pub fn new(prior: f64, beta_max: f64) -> Self {
        Self {
            prior,
            beta_max,
            exploration: ExplorationSchedule::default(),
            recent_blend: None,
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            prior: config.prior,
            beta_max: config.beta_max,
            exploration: config.exploration,
            recent_blend: config.recent_blend.then_some(config.recent_weight),
        }
    }

    pub fn with_exploration(mut self, exploration: ExplorationSchedule) -> Self {
        self.exploration = exploration;
        self
    }

    /// Add `weight` times the recent-window utility to the long-run utility.
    pub fn with_recent_blend(mut self, weight: f64) -> Self {
        self.recent_blend = Some(weight);
        self
    }

    /// Inverse temperature for an estimate with entropy `entropy`,
    /// clamped into [0, beta_max].
    pub fn inverse_temperature(&self, entropy: f64) -> f64 {
        let hmax = max_entropy_bits(MOVE_COUNT);
        let beta = self.beta_max * (hmax - entropy) / hmax;
        if beta.is_finite() {
            beta.clamp(0.0, self.beta_max)
        } else {
            0.0
        }
    }
}

impl DecisionPolicy for EntropySoftmaxPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::EntropySoftmax
    }

    fn estimate(&self, beliefs: &BeliefState, round: RoundContext) -> PolicyEstimate {
        let probs = beliefs.smoothed_probs(self.prior);
        let entropy = shannon_entropy_bits(probs);
        let beta = self.inverse_temperature(entropy);

        let mut utilities = net_utilities(probs);
        if let Some(weight) = self.recent_blend {
            let recent = net_utilities(beliefs.recent_probs());
            for (u, r) in utilities.iter_mut().zip(recent) {
                *u += weight * r;
            }
        }

        let (weights, fallback) = softmax(&utilities, beta);
        let mut action_probs = [1.0 / MOVE_COUNT as f64; MOVE_COUNT];
        if weights.len() == MOVE_COUNT {
            action_probs.copy_from_slice(&weights);
        }

        PolicyEstimate {
            probs,
            entropy,
            max_entropy: max_entropy_bits(MOVE_COUNT),
            beta: Some(beta),
            exploration: self.exploration.rate(round),
            utilities,
            action_probs,
            warmup: round.round_index < warmup_rounds(beliefs.window_len()),
            fallback,
        }
    }

    fn decide(&self, beliefs: &BeliefState, round: RoundContext, rng: &mut StdRng) -> Decision {
        let estimate = self.estimate(beliefs, round);

        if estimate.warmup {
            return Decision {
                chosen: Move::random(rng),
                reason: DecisionReason::Warmup,
                estimate,
            };
        }

        if rng.random::<f64>() < estimate.exploration {
            return Decision {
                chosen: Move::random(rng),
                reason: DecisionReason::Explore,
                estimate,
            };
        }

        if estimate.fallback {
            warn!(
                "round {}: non-finite softmax for utilities {:?}, sampling uniformly",
                round.round_index, estimate.utilities
            );
        }
        debug!(
            "round {}: p={:?} H={:.3} beta={:.3} EU={:?} softmax={:?}",
            round.round_index,
            estimate.probs,
            estimate.entropy,
            estimate.beta.unwrap_or_default(),
            estimate.utilities,
            estimate.action_probs
        );

        let idx = sample_index(rng, &estimate.action_probs).unwrap_or(MOVE_COUNT - 1);
        Decision {
            chosen: Move::from_index(idx).unwrap_or(Move::Scissors),
            reason: DecisionReason::Exploit,
            estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn beliefs_after(moves: &[Move], window_len: usize) -> BeliefState {
        let mut beliefs = BeliefState::new(window_len, 0.98);
        for &mv in moves {
            beliefs.update(mv);
        }
        beliefs
    }

    #[test]
    fn uniform_beliefs_give_zero_temperature() {
        let policy = EntropySoftmaxPolicy::new(0.7, 5.0);
        let beliefs = BeliefState::new(5, 0.98);
        let estimate = policy.estimate(&beliefs, RoundContext::new(10, 15));

        assert_eq!(estimate.probs, [1.0 / 3.0; 3]);
        assert!((estimate.entropy - estimate.max_entropy).abs() < 1e-12);
        assert!(estimate.beta.unwrap().abs() < 1e-12);
        for p in estimate.action_probs {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn predictable_opponent_sharpens_towards_the_counter() {
        let policy = EntropySoftmaxPolicy::new(0.7, 5.0);
        let beliefs = beliefs_after(&[Move::Rock; 30], 5);
        let estimate = policy.estimate(&beliefs, RoundContext::new(30, 40));

        let beta = estimate.beta.unwrap();
        assert!(beta > 0.0 && beta <= 5.0);
        let best = estimate
            .action_probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(best, Move::Paper.index());
        let sum: f64 = estimate.action_probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn warmup_covers_half_the_window() {
        let policy = EntropySoftmaxPolicy::new(0.7, 5.0);
        let beliefs = beliefs_after(&[Move::Rock; 3], 5);
        assert!(policy.estimate(&beliefs, RoundContext::new(1, 15)).warmup);
        assert!(!policy.estimate(&beliefs, RoundContext::new(2, 15)).warmup);
    }

    #[test]
    fn recent_blend_shifts_utilities() {
        let moves = [Move::Rock, Move::Rock, Move::Rock, Move::Scissors, Move::Scissors];
        let beliefs = beliefs_after(&moves, 2);
        let round = RoundContext::new(5, 15);

        let plain = EntropySoftmaxPolicy::new(0.7, 5.0).estimate(&beliefs, round);
        let blended = EntropySoftmaxPolicy::new(0.7, 5.0)
            .with_recent_blend(0.2)
            .estimate(&beliefs, round);

        // Window holds [S, S]; recent utility favours Rock by 0.2 * 1.0
        assert!((blended.utilities[0] - plain.utilities[0] - 0.2).abs() < 1e-12);
        assert!((blended.utilities[1] - plain.utilities[1] + 0.2).abs() < 1e-12);
        assert!((blended.utilities[2] - plain.utilities[2]).abs() < 1e-12);
    }

    #[test]
    fn decide_is_reproducible_for_equal_rng_state() {
        let policy = EntropySoftmaxPolicy::new(0.7, 5.0);
        let beliefs = beliefs_after(&[Move::Paper, Move::Paper, Move::Rock], 5);
        let round = RoundContext::new(7, 15);

        for seed in 0..20 {
            let mut rng1 = StdRng::seed_from_u64(seed);
            let mut rng2 = StdRng::seed_from_u64(seed);
            assert_eq!(
                policy.decide(&beliefs, round, &mut rng1),
                policy.decide(&beliefs, round, &mut rng2)
            );
        }
    }

    #[test]
    fn inverse_temperature_is_clamped() {
        let policy = EntropySoftmaxPolicy::new(0.7, 5.0);
        assert!((policy.inverse_temperature(0.0) - 5.0).abs() < 1e-12);
        assert_eq!(policy.inverse_temperature(10.0), 0.0);
        assert_eq!(policy.inverse_temperature(f64::NAN), 0.0);
    }
}
