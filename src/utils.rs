//! Numeric helpers shared by the belief state and the decision policies

use rand::{Rng, distr::StandardUniform};

/// Shannon entropy in bits: H = -Σ p·log2(p) over p > 0.
///
/// # Examples
///
/// ```
/// use rps_entropy::utils::shannon_entropy_bits;
///
/// let uniform = shannon_entropy_bits([0.5, 0.5]);
/// assert!((uniform - 1.0).abs() < 1e-12);
///
/// let certain = shannon_entropy_bits([1.0, 0.0, 0.0]);
/// assert_eq!(certain, 0.0);
/// ```
pub fn shannon_entropy_bits<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let h: f64 = probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum();
    // -0.0 and tiny negative rounding residue collapse to zero
    h.max(0.0)
}

/// Largest entropy (in bits) a distribution over `outcomes` symbols can have.
pub fn max_entropy_bits(outcomes: usize) -> f64 {
    if outcomes == 0 {
        0.0
    } else {
        (outcomes as f64).log2()
    }
}

/// Fallback behavior when weight normalization fails (zero or non-finite total).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationFallback {
    /// Return None if normalization fails
    None,
    /// Fall back to uniform distribution
    Uniform,
}

/// Normalize weights to probabilities that sum to 1.0.
///
/// Returns the fallback result when the total is zero, negative or not finite.
///
/// # Examples
///
/// ```
/// use rps_entropy::utils::{normalize_weights, NormalizationFallback};
///
/// let normalized = normalize_weights(vec![1.0, 2.0, 1.0], NormalizationFallback::None).unwrap();
/// assert_eq!(normalized, vec![0.25, 0.5, 0.25]);
///
/// let uniform = normalize_weights(vec![0.0, 0.0], NormalizationFallback::Uniform).unwrap();
/// assert_eq!(uniform, vec![0.5, 0.5]);
///
/// assert_eq!(normalize_weights(vec![0.0, 0.0], NormalizationFallback::None), None);
/// ```
pub fn normalize_weights<I>(weights: I, fallback: NormalizationFallback) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let sum: f64 = weights.iter().sum();

    if weights.is_empty() || !sum.is_finite() || sum <= 0.0 {
        return apply_fallback(fallback, weights.len());
    }

    Some(weights.iter().map(|&w| w / sum).collect())
}

fn apply_fallback(fallback: NormalizationFallback, len: usize) -> Option<Vec<f64>> {
    match fallback {
        NormalizationFallback::None => None,
        NormalizationFallback::Uniform if len == 0 => Some(Vec::new()),
        NormalizationFallback::Uniform => Some(vec![1.0 / len as f64; len]),
    }
}

/// Softmax of `beta * values`, computed with max subtraction.
///
/// Non-finite inputs or outputs fall back to the uniform distribution so the
/// result is always a valid categorical distribution. The returned flag is
/// `true` when that fallback was taken.
///
/// # Examples
///
/// ```
/// use rps_entropy::utils::softmax;
///
/// let (probs, fell_back) = softmax(&[0.0, 0.0, 0.0], 3.0);
/// assert!(!fell_back);
/// assert!(probs.iter().all(|p| (p - 1.0 / 3.0).abs() < 1e-12));
///
/// let (probs, fell_back) = softmax(&[f64::NAN, 0.0, 1.0], 1.0);
/// assert!(fell_back);
/// assert_eq!(probs, vec![1.0 / 3.0; 3]);
/// ```
pub fn softmax(values: &[f64], beta: f64) -> (Vec<f64>, bool) {
    let len = values.len();
    if len == 0 {
        return (Vec::new(), false);
    }
    let uniform = || (vec![1.0 / len as f64; len], true);

    if !beta.is_finite() || values.iter().any(|v| !v.is_finite()) {
        return uniform();
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|v| (beta * (v - max)).exp()).collect();

    match normalize_weights(exps, NormalizationFallback::None) {
        Some(probs) if probs.iter().all(|p| p.is_finite()) => (probs, false),
        _ => uniform(),
    }
}

/// Sample an index from a categorical distribution with a single uniform draw.
///
/// Walks the cumulative sum and returns the first index whose running total
/// strictly exceeds the draw. When rounding leaves the total just short of the
/// draw, the last index is returned.
///
/// Returns `None` only for an empty slice.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use rps_entropy::utils::sample_index;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// assert_eq!(sample_index(&mut rng, &[0.0, 1.0, 0.0]), Some(1));
/// assert_eq!(sample_index(&mut rng, &[]), None);
/// ```
pub fn sample_index<R>(rng: &mut R, probabilities: &[f64]) -> Option<usize>
where
    R: Rng + ?Sized,
{
    if probabilities.is_empty() {
        return None;
    }

    let draw: f64 = rng.sample(StandardUniform);
    let mut cumulative = 0.0;
    for (idx, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return Some(idx);
        }
    }

    Some(probabilities.len() - 1)
}
