//! Parameter math for sizing a Bloom filter.
//!
//! Both functions implement the standard optimal-parameter formulas: given a
//! target false positive rate and an expected number of elements, the minimum
//! bit vector size is `-n * ln(p) / ln(2)^2`, and the optimal number of hash
//! functions for that ratio is `(m / n) * ln(2)`.

use crate::error::{BloomError, Result};

/// Computes the number of cells guaranteeing `fp` for `capacity` elements
/// under the optimal hash count.
///
/// Returns an error for a false positive rate outside `(0, 1)` or a zero
/// capacity; `ln` of a non-positive rate has no meaningful result.
pub fn optimal_cells(fp: f64, capacity: usize) -> Result<usize> {
    if fp <= 0.0 || fp >= 1.0 {
        return Err(BloomError::InvalidFalsePositiveRate { rate: fp });
    }
    if capacity == 0 {
        return Err(BloomError::ZeroCapacity);
    }
    let ln2 = std::f64::consts::LN_2;
    Ok((-(capacity as f64) * fp.ln() / (ln2 * ln2)).ceil() as usize)
}

/// Computes the optimal number of hash functions for `cells` and `capacity`.
///
/// Rounds up: a surplus hash function costs a little compute but never
/// exceeds the target false positive rate.
pub fn optimal_hash_count(cells: usize, capacity: usize) -> usize {
    let frac = cells as f64 / capacity as f64;
    (frac * std::f64::consts::LN_2).ceil() as usize
}
