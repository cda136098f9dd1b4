//! Naive reference implementation of the empirical quantile
//!
//! This implementation is intentionally simple and unoptimized.
//! It serves as a reference for verifying the selection-based engine.
//!
//! DO NOT USE IN PRODUCTION - this is for testing and debugging only!

use ordered_float::OrderedFloat;

/// Sort-based empirical quantile
///
/// This implementation:
/// - Sorts every unit from scratch
/// - Walks realizations one vertex and component at a time
/// - Does not transpose, select or parallelize
pub struct NaiveEmpiricalQuantile;

impl NaiveEmpiricalQuantile {
    /// Compute a single quantile of `data`
    ///
    /// # Arguments
    /// * `data` - The observations (sorted internally)
    /// * `p` - The probability (0.0 to 1.0)
    pub fn quantile(data: &[f64], p: f64) -> f64 {
        assert!(!data.is_empty(), "Cannot compute quantile of empty data");
        assert!((0.0..=1.0).contains(&p), "Probability must be in [0, 1]");

        let mut sorted = data.to_vec();
        sorted.sort_by_key(|&x| OrderedFloat(x));

        let n = sorted.len();
        let position = p * n as f64 - 0.5;

        // Below the first or beyond the last observation
        if position <= 0.0 {
            return sorted[0];
        }
        if position >= (n - 1) as f64 {
            return sorted[n - 1];
        }

        let lower = position.floor() as usize;
        let weight = position - lower as f64;
        if weight == 0.0 {
            return sorted[lower];
        }
        (1.0 - weight) * sorted[lower] + weight * sorted[lower + 1]
    }

    /// Quantile of every (vertex, component) across row-major realizations
    /// of `length * dimension` values each
    pub fn quantile_per_component(realizations: &[Vec<f64>], p: f64) -> Vec<f64> {
        assert!(!realizations.is_empty(), "Cannot compute quantile of no realizations");
        let units = realizations[0].len();
        (0..units)
            .map(|unit| {
                let column: Vec<f64> = realizations.iter().map(|r| r[unit]).collect();
                Self::quantile(&column, p)
            })
            .collect()
    }
}
