//! Match pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Playing a bot against any [`Player`] for a fixed number of rounds
//! - Recording every round through pluggable observers
//! - Summarizing and persisting match results

pub mod observers;
pub mod session;

pub use observers::{
    ConsoleObserver, CsvObserver, JsonlObserver, MetricsObserver, MetricsSummary,
    ProgressObserver,
};
pub use session::{MatchConfig, MatchPipeline, MatchResult, RoundRecord};

pub use crate::ports::{Observer, Player};
