//! Recency-window sizing
//!
//! The window grows sub-linearly with the planned session length: the share of
//! the game treated as "recent" is `C / ln(N + e)`, so long sessions keep a
//! shrinking fraction of their history in the window.

use std::f64::consts::E;

/// Scale constant chosen so a 15-round session keeps exactly a third of its
/// rounds (5) in the window.
pub const WINDOW_SCALE: f64 = 0.958_198_992_733_070_5;

/// Cap applied by earlier revisions of the bot. Not applied unless requested.
pub const LEGACY_WINDOW_CAP: usize = 50;

/// Fraction of a session of `total_rounds` rounds kept in the recency window.
///
/// Returns 0.0 for non-positive round counts.
pub fn window_proportion(total_rounds: i64) -> f64 {
    if total_rounds <= 0 {
        return 0.0;
    }
    WINDOW_SCALE / (total_rounds as f64 + E).ln()
}

/// Window length `k = round(N · C / ln(N + e))`, optionally capped.
///
/// Non-positive round counts yield 0. Halves round to even.
///
/// # Examples
///
/// ```
/// use rps_entropy::beliefs::window::recent_window_len;
///
/// assert_eq!(recent_window_len(15, None), 5);
/// assert_eq!(recent_window_len(0, None), 0);
/// assert_eq!(recent_window_len(-4, None), 0);
/// assert_eq!(recent_window_len(1000, Some(50)), 50);
/// ```
pub fn recent_window_len(total_rounds: i64, cap: Option<usize>) -> usize {
    if total_rounds <= 0 {
        return 0;
    }
    let tentative = total_rounds as f64 * window_proportion(total_rounds);
    let k = tentative.round_ties_even().max(0.0) as usize;
    match cap {
        Some(cap) => k.min(cap),
        None => k,
    }
}

/// Number of opening rounds played uniformly at random: `round(k / 2)`,
/// halves rounding to even.
pub fn warmup_rounds(window_len: usize) -> usize {
    (window_len as f64 / 2.0).round_ties_even() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_window_lengths() {
        let expected = [
            (1, 1),
            (2, 1),
            (3, 2),
            (5, 2),
            (10, 4),
            (15, 5),
            (20, 6),
            (50, 12),
            (100, 21),
            (1000, 139),
            (10_000, 1040),
        ];
        for (rounds, k) in expected {
            assert_eq!(recent_window_len(rounds, None), k, "N = {rounds}");
        }
    }

    #[test]
    fn fifteen_rounds_keeps_a_third() {
        let proportion = window_proportion(15);
        assert!((proportion - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn window_is_monotone_and_non_negative() {
        let mut previous = 0;
        for rounds in -5..5_000 {
            let k = recent_window_len(rounds, None);
            assert!(k >= previous, "k dropped from {previous} to {k} at N = {rounds}");
            previous = k;
        }
    }

    #[test]
    fn cap_is_opt_in() {
        assert_eq!(recent_window_len(1000, None), 139);
        assert_eq!(recent_window_len(1000, Some(LEGACY_WINDOW_CAP)), 50);
        assert_eq!(recent_window_len(10, Some(LEGACY_WINDOW_CAP)), 4);
    }

    #[test]
    fn warmup_rounds_half_to_even() {
        assert_eq!(warmup_rounds(0), 0);
        assert_eq!(warmup_rounds(1), 0);
        assert_eq!(warmup_rounds(3), 2);
        assert_eq!(warmup_rounds(4), 2);
        assert_eq!(warmup_rounds(5), 2);
        assert_eq!(warmup_rounds(7), 4);
    }
}
