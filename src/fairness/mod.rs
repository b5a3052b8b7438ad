//! Differential Fairness estimation
//!
//! Computes the empirical Differential Fairness value ε over intersectional
//! groups:
//!
//! ```text
//! ε = max over groups i, j of | ln P(ŷ=1 | i) − ln P(ŷ=1 | j) |
//! ```
//!
//! Per-group positive rates use additive (Krichevsky–Trofimov-style)
//! smoothing, `(k + prior) / (n + 2·prior)`, which keeps every rate strictly
//! inside (0, 1) so the logarithms stay finite even for groups whose
//! predictions are uniformly 0 or uniformly 1.
//!
//! # Example
//!
//! ```
//! use equidad::fairness::DifferentialFairness;
//!
//! let predictions = vec![1.0, 1.0, 0.0, 1.0];
//! let groups: Vec<String> = ["a", "a", "b", "b"]
//!     .iter().map(|s| s.to_string()).collect();
//!
//! let epsilon = DifferentialFairness::default()
//!     .epsilon(&predictions, &groups)
//!     .unwrap();
//! assert!(epsilon > 0.0);
//! ```

use crate::{Error, Result};
use std::collections::HashMap;

mod rates;


pub use rates::{accuracy_by_group, group_accuracy, positive_rates, GroupAccuracy, GroupRate};

/// Default smoothing prior.
pub const DEFAULT_PRIOR: f64 = 1e-6;

/// Trait for scalar fairness metrics over grouped binary predictions.
pub trait GroupMetric {
    /// Compute the metric given predictions and aligned group labels.
    fn compute(&self, predictions: &[f64], groups: &[String]) -> Result<f64>;

    /// Name of the metric
    fn name(&self) -> &str;

    /// Whether lower values indicate fairer behaviour (true for disparity
    /// measures like ε).
    fn lower_is_better(&self) -> bool {
        true
    }
}

// =============================================================================
// DifferentialFairness
// =============================================================================

/// Empirical Differential Fairness (ε) estimator.
///
/// `exp(ε)` approximates the largest ratio of positive-prediction rates
/// between any two groups; ε = 0 means every group receives positive
/// predictions at the same (smoothed) rate.
///
/// The smoothing prior is configuration, not a constant: it trades bias from
/// smoothing against instability for very small groups, and callers with
/// skewed group-size distributions may need to raise it.
///
/// # Example
///
/// ```
/// use equidad::fairness::DifferentialFairness;
///
/// let df = DifferentialFairness::new(1e-6);
/// let predictions = vec![1.0, 0.0];
/// let groups = vec!["g".to_string(), "g".to_string()];
///
/// // A single group cannot exhibit disparity
/// assert_eq!(df.epsilon(&predictions, &groups).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DifferentialFairness {
    prior: f64,
}

impl DifferentialFairness {
    /// Create an estimator with the given smoothing prior.
    pub fn new(prior: f64) -> Self {
        Self { prior }
    }

    /// The configured smoothing prior.
    pub fn prior(&self) -> f64 {
        self.prior
    }

    /// Compute ε for binary predictions paired positionally with group
    /// labels.
    ///
    /// Fails with [`Error::LengthMismatch`] when the slices differ in length
    /// and with [`Error::NonBinaryPredictions`] when any prediction is not
    /// exactly 0 or 1 (NaN included). Once validation passes the computation
    /// cannot fail: smoothing bounds every group rate strictly inside (0, 1).
    pub fn epsilon(&self, predictions: &[f64], groups: &[String]) -> Result<f64> {
        validate_binary_aligned(predictions, groups)?;

        let tally = tally_groups(predictions, groups);

        // A single group cannot exhibit disparity
        if tally.len() <= 1 {
            return Ok(0.0);
        }

        // max |ln p_i − ln p_j| over all pairs is attained at the extremes,
        // so one pass over the groups suffices
        let mut min_log = f64::INFINITY;
        let mut max_log = f64::NEG_INFINITY;
        for &(n, k) in tally.values() {
            let log_p = self.smoothed_rate(n, k).ln();
            min_log = min_log.min(log_p);
            max_log = max_log.max(log_p);
        }

        Ok(max_log - min_log)
    }

    /// Smoothed positive rate `(k + prior) / (n + 2·prior)` for a group of
    /// `n` subjects with `k` positive predictions.
    pub fn smoothed_rate(&self, n: usize, k: usize) -> f64 {
        (k as f64 + self.prior) / (n as f64 + 2.0 * self.prior)
    }
}

impl Default for DifferentialFairness {
    fn default() -> Self {
        Self::new(DEFAULT_PRIOR)
    }
}

impl GroupMetric for DifferentialFairness {
    fn compute(&self, predictions: &[f64], groups: &[String]) -> Result<f64> {
        self.epsilon(predictions, groups)
    }

    fn name(&self) -> &str {
        "DifferentialFairness"
    }
}

// =============================================================================
// Shared validation and tallying
// =============================================================================

/// Check the alignment and value-domain contract shared by the estimator and
/// the rate summaries: equal lengths, and predictions exactly 0 or 1.
pub(crate) fn validate_binary_aligned(predictions: &[f64], groups: &[String]) -> Result<()> {
    if predictions.len() != groups.len() {
        return Err(Error::LengthMismatch {
            predictions: predictions.len(),
            groups: groups.len(),
        });
    }
    // NaN fails both comparisons and is rejected here too
    if predictions.iter().any(|&p| p != 0.0 && p != 1.0) {
        return Err(Error::NonBinaryPredictions);
    }
    Ok(())
}

/// Per-group `(n, k)` tally: subject count and positive-prediction count.
pub(crate) fn tally_groups<'a>(
    predictions: &[f64],
    groups: &'a [String],
) -> HashMap<&'a str, (usize, usize)> {
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
    for (p, g) in predictions.iter().zip(groups) {
        let entry = tally.entry(g.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if *p == 1.0 {
            entry.1 += 1;
        }
    }
    tally
}
