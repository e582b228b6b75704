//! Common test utilities for the rps-entropy test suite.
//!
//! Statistical helpers and small fixtures shared across integration tests.

#![allow(dead_code)]

use rps_entropy::{BeliefState, Move, beliefs::window::recent_window_len, rps::MOVE_COUNT};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Tolerance for floating point comparisons.
pub const EPS: f64 = 1e-9;

/// Pearson chi-square statistic of `observed` counts against a uniform
/// expectation.
pub fn chi_square_uniform(observed: &[usize]) -> f64 {
    let total: usize = observed.iter().sum();
    let expected = total as f64 / observed.len() as f64;
    observed
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Critical value of the chi-square distribution with `dof` degrees of
/// freedom at significance level `alpha`.
pub fn chi_square_critical(dof: usize, alpha: f64) -> f64 {
    let dist = ChiSquared::new(dof as f64).expect("degrees of freedom must be positive");
    dist.inverse_cdf(1.0 - alpha)
}

/// Assert that `observed` counts are consistent with a uniform distribution
/// at the 0.1% level.
pub fn assert_uniform(observed: &[usize]) {
    let statistic = chi_square_uniform(observed);
    let critical = chi_square_critical(observed.len() - 1, 0.001);
    assert!(
        statistic < critical,
        "counts {observed:?} reject uniformity: chi2 = {statistic:.3} >= {critical:.3}"
    );
}

/// Tally moves by index.
pub fn count_moves(moves: impl IntoIterator<Item = Move>) -> [usize; MOVE_COUNT] {
    let mut counts = [0; MOVE_COUNT];
    for mv in moves {
        counts[mv.index()] += 1;
    }
    counts
}

/// Beliefs for a session of `total_rounds` rounds that have seen `history`.
pub fn beliefs_after(total_rounds: i64, history: &[Move]) -> BeliefState {
    let mut beliefs = BeliefState::new(recent_window_len(total_rounds, None), 0.98);
    for &mv in history {
        beliefs.update(mv);
    }
    beliefs
}

/// Parse a compact history such as `"RRPS"`.
pub fn moves(history: &str) -> Vec<Move> {
    history
        .chars()
        .map(|c| c.to_string().parse().expect("valid move letter"))
        .collect()
}
