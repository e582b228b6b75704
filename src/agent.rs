//! The adaptive opponent-prediction bot
//!
//! [`EntropyBot`] pairs one [`BeliefState`] with one [`DecisionPolicy`] and a
//! private RNG stream. Per round the caller asks for a move, obtains the
//! opponent's real move elsewhere, and feeds it back:
//!
//! ```
//! use rps_entropy::{BotConfig, EntropyBot, Move};
//!
//! let mut bot = EntropyBot::new(15, BotConfig::default().with_seed(7))?;
//! for round in 0..15 {
//!     let _ours = bot.choose_move(round);
//!     bot.record_opponent_move(Move::Rock);
//! }
//! assert_eq!(bot.beliefs().real_counts(), [15, 0, 0]);
//! # Ok::<(), rps_entropy::Error>(())
//! ```

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    app::BotConfig,
    beliefs::{
        BeliefState,
        window::{recent_window_len, warmup_rounds},
    },
    policy::{Decision, DecisionPolicy, RoundContext},
    ports::Player,
    rps::{MOVE_COUNT, Move},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Read-only projection of the bot's state for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Long-run estimate of the opponent's distribution
    pub probs: [f64; MOVE_COUNT],
    /// Entropy of `probs` in bits
    pub entropy: f64,
    /// log2(3)
    pub max_entropy: f64,
    /// Inverse temperature the next exploitation step would use
    pub beta: Option<f64>,
    /// Exploration probability for the next round
    pub exploration: f64,
    /// Raw frequencies inside the recency window
    pub recent_probs: [f64; MOVE_COUNT],
    /// Recency window contents, oldest first
    pub recent_window: Vec<Move>,
    /// Exact lifetime counts of the opponent's moves
    pub real_counts: [u64; MOVE_COUNT],
    /// Exponentially decayed counts
    pub decayed_counts: [f64; MOVE_COUNT],
    /// Window bound `k`
    pub window_len: usize,
    /// Rounds played uniformly at random before beliefs are trusted
    pub warmup_rounds: usize,
}

/// Adaptive Rock/Paper/Scissors bot
#[derive(Debug)]
pub struct EntropyBot {
    name: String,
    config: BotConfig,
    total_rounds: usize,
    beliefs: BeliefState,
    policy: Box<dyn DecisionPolicy>,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl EntropyBot {
    /// Create a bot for a session of `total_rounds` rounds.
    ///
    /// The recency window length is derived from `total_rounds` once, here.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn new(total_rounds: usize, config: BotConfig) -> Result<Self> {
        config.validate()?;
        let rounds = i64::try_from(total_rounds).unwrap_or(i64::MAX);
        let window_len = recent_window_len(rounds, config.window_cap);
        let policy = config.policy.into_boxed_policy(&config);
        Ok(Self {
            name: "EntropyBot".to_string(),
            total_rounds,
            beliefs: BeliefState::new(window_len, config.decay),
            policy,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
            config,
        })
    }

    /// Rename the bot (useful when two bots face each other).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Pick the move for zero-based round `round_index`, with the reasoning.
    ///
    /// Beliefs are only borrowed; the bot's RNG is the only state advanced.
    pub fn decide(&mut self, round_index: usize) -> Decision {
        let round = RoundContext::new(round_index, self.total_rounds);
        self.policy.decide(&self.beliefs, round, &mut self.rng)
    }

    /// Pick the move for zero-based round `round_index`.
    pub fn choose_move(&mut self, round_index: usize) -> Move {
        self.decide(round_index).chosen
    }

    /// Feed back the opponent's realized move for the round just played.
    pub fn record_opponent_move(&mut self, opponent_move: Move) {
        self.beliefs.update(opponent_move);
    }

    /// Snapshot of the quantities worth displaying, evaluated for the next
    /// round to be played.
    pub fn diagnostics(&self) -> Diagnostics {
        let next_round = usize::try_from(self.beliefs.observations()).unwrap_or(usize::MAX);
        let estimate = self
            .policy
            .estimate(&self.beliefs, RoundContext::new(next_round, self.total_rounds));
        Diagnostics {
            probs: estimate.probs,
            entropy: estimate.entropy,
            max_entropy: estimate.max_entropy,
            beta: estimate.beta,
            exploration: estimate.exploration,
            recent_probs: self.beliefs.recent_probs(),
            recent_window: self.beliefs.recent_window().collect(),
            real_counts: self.beliefs.real_counts(),
            decayed_counts: self.beliefs.decayed_counts(),
            window_len: self.beliefs.window_len(),
            warmup_rounds: warmup_rounds(self.beliefs.window_len()),
        }
    }

    pub fn beliefs(&self) -> &BeliefState {
        &self.beliefs
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn DecisionPolicy {
        self.policy.as_ref()
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    /// Replace the RNG stream. `None` draws a fresh seed from the OS.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = build_rng(seed);
        self.rng_seed = seed;
    }

    /// Forget every observation and restart the RNG stream from its seed.
    pub fn reset(&mut self) {
        self.beliefs = BeliefState::new(self.beliefs.window_len(), self.config.decay);
        self.rng = build_rng(self.rng_seed);
    }
}

impl Player for EntropyBot {
    fn decide_move(&mut self, round_index: usize) -> Result<Move> {
        Ok(self.choose_move(round_index))
    }

    fn observe_opponent_move(&mut self, opponent_move: Move) -> Result<()> {
        self.record_opponent_move(opponent_move);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.reseed(Some(seed));
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        EntropyBot::reset(self);
        Ok(())
    }
}
