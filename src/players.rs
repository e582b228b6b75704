//! Opponents the bot can face
//!
//! A closed set of [`Player`] implementations: the scripted bots used for
//! simulations, another [`EntropyBot`], and the interactive [`HumanPlayer`].

pub mod human;
pub mod scripted;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use human::HumanPlayer;
pub use scripted::{CopyCatPlayer, CyclicPlayer, RandomPlayer};

use crate::{Result, agent::EntropyBot, app::BotConfig, ports::Player};

/// Kind of opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerKind {
    /// Uniformly random throws
    Random,
    /// Repeats whatever it last saw
    CopyCat,
    /// Replays a short random cycle
    Cyclic,
    /// Another adaptive bot with default parameters
    Entropy,
    /// A person on standard input/output
    Human,
}

impl PlayerKind {
    pub const ALL: [PlayerKind; 5] = [
        PlayerKind::Random,
        PlayerKind::CopyCat,
        PlayerKind::Cyclic,
        PlayerKind::Entropy,
        PlayerKind::Human,
    ];

    /// Kinds that play without a person at the keyboard
    pub const SIMULATED: [PlayerKind; 4] = [
        PlayerKind::Random,
        PlayerKind::CopyCat,
        PlayerKind::Cyclic,
        PlayerKind::Entropy,
    ];

    pub fn is_interactive(self) -> bool {
        matches!(self, PlayerKind::Human)
    }

    /// Creates a boxed player of this kind for a session of `total_rounds`.
    pub fn into_boxed_player(self, total_rounds: usize, seed: Option<u64>) -> Result<Box<dyn Player>> {
        let player: Box<dyn Player> = match self {
            PlayerKind::Random => Box::new(RandomPlayer::new(seed)),
            PlayerKind::CopyCat => Box::new(CopyCatPlayer::new(seed)),
            PlayerKind::Cyclic => Box::new(CyclicPlayer::new(seed)),
            PlayerKind::Entropy => {
                let mut config = BotConfig::default();
                config.seed = seed;
                Box::new(EntropyBot::new(total_rounds, config)?.with_name("OpponentEntropyBot"))
            }
            PlayerKind::Human => Box::new(HumanPlayer::stdio()),
        };
        Ok(player)
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerKind::Random => "random",
            PlayerKind::CopyCat => "copycat",
            PlayerKind::Cyclic => "cyclic",
            PlayerKind::Entropy => "entropy",
            PlayerKind::Human => "human",
        };
        f.write_str(label)
    }
}

impl FromStr for PlayerKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(PlayerKind::Random),
            "copycat" | "copy-cat" | "copy" => Ok(PlayerKind::CopyCat),
            "cyclic" | "cycle" => Ok(PlayerKind::Cyclic),
            "entropy" | "entropybot" => Ok(PlayerKind::Entropy),
            "human" | "me" => Ok(PlayerKind::Human),
            _ => Err(crate::Error::ParsePlayerKind {
                input: s.to_string(),
                expected: "random, copycat, cyclic, entropy, human".to_string(),
            }),
        }
    }
}
