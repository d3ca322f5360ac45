//! Similarity primitives for semantic segmentation.
//!
//! ## Cosine Similarity
//!
//! ```text
//! cos(a, b) = (a · b) / (‖a‖ ‖b‖)
//! ```
//!
//! Undefined when either vector has zero norm. Instead of quietly returning
//! `0.0` (which would look like "unrelated" and plant a breakpoint), a zero
//! vector, or one with a NaN or infinite component, is reported as
//! [`Error::DegenerateVector`]. Norms and dot products are accumulated in
//! `f64` so tiny or huge but finite components still count.
//!
//! ## Percentile Rule
//!
//! Thresholds use linear interpolation between closest ranks, the same rule
//! as NumPy's default `percentile`:
//!
//! ```text
//! sorted = [0.1, 0.4, 0.8, 0.9]      p = 30
//! rank   = 0.30 × (4 - 1) = 0.9
//! value  = 0.1 + (0.4 - 0.1) × 0.9 = 0.37
//! ```

use tracing::trace;

use crate::{Error, Result};

/// Cosine similarity between two vectors, clamped to `[-1, 1]`.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if the lengths differ or either vector is empty.
/// - [`Error::DegenerateVector`] if either vector is all zeros or has a
///   NaN or infinite component. `index` is 0 for `a` and 1 for `b`.
///
/// ```rust
/// use chunklab::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 1.0]).unwrap();
/// assert!((sim - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    cosine_at(a, b, 0)
}

/// Cosine similarity of every adjacent pair: `N` vectors give `N - 1` scores.
///
/// # Errors
///
/// Same as [`cosine_similarity`]; a degenerate vector is reported with its
/// position in `vectors`.
pub fn adjacent_similarities<V: AsRef<[f32]>>(vectors: &[V]) -> Result<Vec<f32>> {
    vectors
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let sim = cosine_at(pair[0].as_ref(), pair[1].as_ref(), i)?;
            trace!(pair = i, similarity = sim, "adjacent similarity");
            Ok(sim)
        })
        .collect()
}

fn cosine_at(a: &[f32], b: &[f32], offset: usize) -> Result<f32> {
    if a.is_empty() || b.is_empty() {
        return Err(Error::invalid("embedding vectors must not be empty"));
    }
    if a.len() != b.len() {
        return Err(Error::invalid(format!(
            "embedding dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let norm_a = norm(a).ok_or(Error::DegenerateVector { index: offset })?;
    let norm_b = norm(b).ok_or(Error::DegenerateVector { index: offset + 1 })?;

    let dot: f64 = a.iter().zip(b).map(|(&x, &y)| f64::from(x) * f64::from(y)).sum();
    Ok(((dot / (norm_a * norm_b)) as f32).clamp(-1.0, 1.0))
}

/// Euclidean norm in `f64`, or `None` for a zero vector or one with a
/// non-finite component. Squares of finite `f32` values never overflow or
/// underflow to zero in `f64`.
fn norm(v: &[f32]) -> Option<f64> {
    if v.iter().any(|x| !x.is_finite()) {
        return None;
    }
    let norm = v.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt();
    (norm > 0.0).then_some(norm)
}

/// The `p`-th percentile of `values` using linear interpolation.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if `values` is empty, contains NaN, or
/// `p` is outside `[0, 100]`.
///
/// ```rust
/// use chunklab::percentile;
///
/// let values = [0.9, 0.1, 0.8, 0.4];
/// assert_eq!(percentile(&values, 0.0).unwrap(), 0.1);
/// assert_eq!(percentile(&values, 100.0).unwrap(), 0.9);
/// assert!((percentile(&values, 30.0).unwrap() - 0.37).abs() < 1e-6);
/// ```
pub fn percentile(values: &[f32], p: f32) -> Result<f32> {
    check_percentile(p)?;
    if values.is_empty() {
        return Err(Error::invalid("percentile of an empty sequence"));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(Error::invalid("percentile input contains NaN"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);

    let rank = p / 100.0 * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(sorted.len() - 1);
    let (low, high) = (sorted[lo], sorted[hi]);

    // Clamp so rounding never carries the value past its bracketing ranks;
    // this keeps the result monotonic in `p`.
    Ok((low + (high - low) * (rank - lo as f32)).clamp(low, high))
}

pub(crate) fn check_percentile(p: f32) -> Result<()> {
    if p.is_finite() && (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::invalid(format!("percentile {p} outside [0, 100]")))
    }
}

/// Unit indices at which a new chunk starts.
///
/// A breakpoint is declared at `i + 1` when `similarities[i] < threshold`.
/// Scores equal to the threshold never break. The result is strictly
/// ascending.
///
/// ```rust
/// use chunklab::breakpoints;
///
/// assert_eq!(breakpoints(&[0.9, 0.1, 0.8], 0.5), vec![2]);
/// assert!(breakpoints(&[0.5, 0.5], 0.5).is_empty());
/// ```
pub fn breakpoints(similarities: &[f32], threshold: f32) -> Vec<usize> {
    similarities
        .iter()
        .enumerate()
        .filter(|&(_, &sim)| sim < threshold)
        .map(|(i, _)| i + 1)
        .collect()
}
