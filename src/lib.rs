//! Adaptive Rock/Paper/Scissors agent
//!
//! This crate provides:
//! - The move alphabet, cyclic dominance and round scoring
//! - Decayed, Laplace-smoothed beliefs about an opponent, plus a recency
//!   window sized from the planned session length
//! - Decision policies: entropy-gated softmax play and a fixed-ε frequency bot
//! - Scripted and interactive opponents, a match pipeline and observers
//! - The `rps` command-line interface

pub mod agent;
pub mod app;
pub mod beliefs;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod players;
pub mod policy;
pub mod ports;
pub mod rps;
pub mod utils;

pub use agent::{Diagnostics, EntropyBot};
pub use app::BotConfig;
pub use beliefs::BeliefState;
pub use error::{Error, Result};
pub use players::PlayerKind;
pub use policy::{Decision, DecisionPolicy, DecisionReason, PolicyKind};
pub use ports::{Observer, Player};
pub use rps::{Move, RoundOutcome};
