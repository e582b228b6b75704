//! Shared bot configuration flags for CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{app::BotConfig, policy::PolicyKind};

/// Bot parameters; flags override values loaded from `--config`
#[derive(Args, Debug, Clone, Default)]
pub struct BotArgs {
    /// JSON file with bot parameters (missing fields take defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Decision strategy (entropy-softmax, frequency)
    #[arg(long)]
    pub policy: Option<PolicyKind>,

    /// Laplace prior strength added to every count
    #[arg(long)]
    pub prior: Option<f64>,

    /// Per-round decay of the long-run counts
    #[arg(long)]
    pub decay: Option<f64>,

    /// Largest softmax inverse temperature
    #[arg(long = "beta-max")]
    pub beta_max: Option<f64>,

    /// Cap on the recency window length
    #[arg(long = "window-cap")]
    pub window_cap: Option<usize>,

    /// Blend recent-window utility in with this weight
    #[arg(long = "recent-blend")]
    pub recent_blend: Option<f64>,
}

impl BotArgs {
    /// Build the effective bot configuration.
    pub fn resolve(&self, seed: Option<u64>) -> Result<BotConfig> {
        let mut config = match &self.config {
            Some(path) => BotConfig::load(path)
                .with_context(|| format!("loading bot config from {}", path.display()))?,
            None => BotConfig::default(),
        };

        if let Some(policy) = self.policy {
            config = config.with_policy(policy);
        }
        if let Some(prior) = self.prior {
            config = config.with_prior(prior);
        }
        if let Some(decay) = self.decay {
            config = config.with_decay(decay);
        }
        if let Some(beta_max) = self.beta_max {
            config = config.with_beta_max(beta_max);
        }
        if let Some(cap) = self.window_cap {
            config = config.with_window_cap(cap);
        }
        if let Some(weight) = self.recent_blend {
            config = config.with_recent_blend(weight);
        }
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }

        config.validate()?;
        Ok(config)
    }
}
