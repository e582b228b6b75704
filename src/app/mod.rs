//! Application layer: bot configuration
//!
//! A [`BotConfig`] fixes every tunable of an [`EntropyBot`](crate::EntropyBot)
//! for the length of a session. It can be built in code, loaded from a JSON
//! file, or both (file first, then builder overrides).
//!
//! ```
//! use rps_entropy::app::BotConfig;
//!
//! let config = BotConfig::default().with_seed(42).with_window_cap(50);
//! config.validate()?;
//! # Ok::<(), rps_entropy::Error>(())
//! ```

pub mod config;

pub use config::BotConfig;
