//! Belief state over the opponent's move distribution.
//!
//! Keeps three views of the opponent's history, all updated together once per
//! round:
//! - exponentially decayed counts, which feed the Laplace-smoothed long-run
//!   estimate,
//! - exact lifetime counts, used as the smoothing denominator,
//! - a bounded FIFO of the most recent moves and their raw frequencies.

pub mod window;

use std::collections::VecDeque;

use log::trace;
use serde::Serialize;

use crate::{
    rps::{MOVE_COUNT, Move},
    utils::shannon_entropy_bits,
};

const UNIFORM: [f64; MOVE_COUNT] = [1.0 / 3.0; MOVE_COUNT];

/// Serializable for export only; the sole constructor is [`BeliefState::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeliefState {
    decayed_counts: [f64; MOVE_COUNT],
    real_counts: [u64; MOVE_COUNT],
    recent_window: VecDeque<Move>,
    recent_probs: [f64; MOVE_COUNT],
    window_len: usize,
    decay: f64,
}

impl BeliefState {
    /// Empty beliefs with a recency window of `window_len` moves and a
    /// per-round decay factor `decay`.
    ///
    /// # Panics
    ///
    /// Panics if `decay` is not a finite value in (0, 1].
    pub fn new(window_len: usize, decay: f64) -> Self {
        assert!(
            decay.is_finite() && decay > 0.0 && decay <= 1.0,
            "Decay must lie in (0, 1]"
        );
        Self {
            decayed_counts: [0.0; MOVE_COUNT],
            real_counts: [0; MOVE_COUNT],
            recent_window: VecDeque::with_capacity(window_len.saturating_add(1)),
            recent_probs: [0.0; MOVE_COUNT],
            window_len,
            decay,
        }
    }

    /// Record one realized opponent move.
    ///
    /// Order matters: the window is trimmed before its frequencies are
    /// recomputed, and decay is applied before the new observation is added.
    pub fn update(&mut self, opponent_move: Move) {
        self.recent_window.push_back(opponent_move);
        while self.recent_window.len() > self.window_len {
            self.recent_window.pop_front();
        }
        self.recent_probs = self.window_frequencies();

        for count in self.decayed_counts.iter_mut() {
            *count *= self.decay;
        }
        let idx = opponent_move.index();
        self.decayed_counts[idx] += 1.0;
        self.real_counts[idx] += 1;

        trace!(
            "observed {opponent_move}: decayed={:?} real={:?} recent={:?}",
            self.decayed_counts, self.real_counts, self.recent_probs
        );
    }

    fn window_frequencies(&self) -> [f64; MOVE_COUNT] {
        let len = self.recent_window.len();
        if len == 0 {
            return [0.0; MOVE_COUNT];
        }
        let mut counts = [0.0; MOVE_COUNT];
        for mv in &self.recent_window {
            counts[mv.index()] += 1.0;
        }
        counts.map(|c| c / len as f64)
    }

    /// Laplace-smoothed long-run estimate with prior strength `prior`:
    /// `(decayed[j] + a) / (n + 3a)`, or uniform before any observation.
    ///
    /// The denominator uses the undecayed total, so once decay has thinned the
    /// counts the estimate sums to less than one and the missing mass acts as
    /// extra caution.
    pub fn smoothed_probs(&self, prior: f64) -> [f64; MOVE_COUNT] {
        let n = self.observations();
        if n == 0 {
            return UNIFORM;
        }
        let denom = n as f64 + MOVE_COUNT as f64 * prior;
        let mut probs = [0.0; MOVE_COUNT];
        for (p, count) in probs.iter_mut().zip(self.decayed_counts) {
            *p = (count + prior) / denom;
        }
        probs
    }

    /// Raw lifetime frequencies, uniform before any observation.
    pub fn empirical_probs(&self) -> [f64; MOVE_COUNT] {
        let n = self.observations();
        if n == 0 {
            return UNIFORM;
        }
        let mut probs = [0.0; MOVE_COUNT];
        for (p, count) in probs.iter_mut().zip(self.real_counts) {
            *p = count as f64 / n as f64;
        }
        probs
    }

    /// Entropy in bits of the smoothed estimate.
    pub fn entropy(&self, prior: f64) -> f64 {
        shannon_entropy_bits(self.smoothed_probs(prior))
    }

    pub fn decayed_counts(&self) -> [f64; MOVE_COUNT] {
        self.decayed_counts
    }

    pub fn real_counts(&self) -> [u64; MOVE_COUNT] {
        self.real_counts
    }

    /// Total number of observed opponent moves (`n`).
    pub fn observations(&self) -> u64 {
        self.real_counts.iter().sum()
    }

    /// Most recent opponent moves, oldest first.
    pub fn recent_window(&self) -> impl ExactSizeIterator<Item = Move> + '_ {
        self.recent_window.iter().copied()
    }

    /// Raw frequencies inside the recency window; all zero while it is empty.
    pub fn recent_probs(&self) -> [f64; MOVE_COUNT] {
        self.recent_probs
    }

    /// Window bound `k`.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }
}
