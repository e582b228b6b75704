//! Configuration types for bot creation.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    policy::{ExplorationSchedule, PolicyKind, frequency::DEFAULT_FREQUENCY_EPSILON},
};

/// Configuration for creating an [`EntropyBot`](crate::EntropyBot).
///
/// Fields left out of a JSON file take their defaults:
///
/// ```
/// use rps_entropy::app::BotConfig;
///
/// let config: BotConfig = serde_json::from_str(r#"{ "beta_max": 3.0 }"#).unwrap();
/// assert_eq!(config.beta_max, 3.0);
/// assert_eq!(config.prior, 0.7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Laplace prior strength `a` added to every decayed count
    pub prior: f64,
    /// Weight `b` of the recent-window utility when the blend is enabled
    pub recent_weight: f64,
    /// Add `b` times the recent-window utility to the long-run utility
    pub recent_blend: bool,
    /// Per-round decay `γ` applied to the decayed counts
    pub decay: f64,
    /// Largest softmax inverse temperature `βmax`
    pub beta_max: f64,
    /// Exploration schedule for the entropy policy
    pub exploration: ExplorationSchedule,
    /// Upper bound on the recency window; `None` leaves it uncapped
    pub window_cap: Option<usize>,
    /// Strategy used to turn beliefs into moves
    pub policy: PolicyKind,
    /// Fixed exploration rate of the frequency policy
    pub frequency_epsilon: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prior: 0.7,
            recent_weight: 0.2,
            recent_blend: false,
            decay: 0.98,
            beta_max: 5.0,
            exploration: ExplorationSchedule::default(),
            window_cap: None,
            policy: PolicyKind::default(),
            frequency_epsilon: DEFAULT_FREQUENCY_EPSILON,
            seed: None,
        }
    }
}

impl BotConfig {
    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the Laplace prior strength.
    pub fn with_prior(mut self, prior: f64) -> Self {
        self.prior = prior;
        self
    }

    /// Set the per-round decay factor.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Set the maximum inverse temperature.
    pub fn with_beta_max(mut self, beta_max: f64) -> Self {
        self.beta_max = beta_max;
        self
    }

    /// Enable the recent-window blend with weight `weight`.
    pub fn with_recent_blend(mut self, weight: f64) -> Self {
        self.recent_blend = true;
        self.recent_weight = weight;
        self
    }

    /// Cap the recency window at `cap` moves.
    pub fn with_window_cap(mut self, cap: usize) -> Self {
        self.window_cap = Some(cap);
        self
    }

    /// Set the exploration schedule.
    pub fn with_exploration(mut self, exploration: ExplorationSchedule) -> Self {
        self.exploration = exploration;
        self
    }

    /// Select the decision strategy.
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Check every parameter against its admissible range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.prior.is_finite() && self.prior > 0.0) {
            return Err(Error::config(format!(
                "prior must be positive and finite, got {}",
                self.prior
            )));
        }
        if !(self.recent_weight.is_finite() && self.recent_weight >= 0.0) {
            return Err(Error::config(format!(
                "recent_weight must be non-negative and finite, got {}",
                self.recent_weight
            )));
        }
        if !(self.decay.is_finite() && self.decay > 0.0 && self.decay < 1.0) {
            return Err(Error::config(format!(
                "decay must lie in (0, 1), got {}",
                self.decay
            )));
        }
        if !(self.beta_max.is_finite() && self.beta_max >= 0.0) {
            return Err(Error::config(format!(
                "beta_max must be non-negative and finite, got {}",
                self.beta_max
            )));
        }
        let ExplorationSchedule { initial, floor } = self.exploration;
        for (name, rate) in [
            ("exploration.initial", initial),
            ("exploration.floor", floor),
            ("frequency_epsilon", self.frequency_epsilon),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(Error::config(format!(
                    "{name} must lie in [0, 1], got {rate}"
                )));
            }
        }
        if floor > initial {
            return Err(Error::config(format!(
                "exploration.floor ({floor}) exceeds exploration.initial ({initial})"
            )));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
