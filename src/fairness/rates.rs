//! Per-group rate summaries
//!
//! Unsmoothed group-level statistics for interpretation and visualization:
//! positive-prediction rates (the quantity ε aggregates) and per-group
//! accuracy. These feed bar charts and report tables; ε remains the scalar
//! summary.

use super::{tally_groups, validate_binary_aligned};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Positive-prediction rate of one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRate {
    /// Canonical group label
    pub label: String,
    /// Number of subjects in the group
    pub count: usize,
    /// Unsmoothed `P(ŷ=1 | group)`
    pub positive_rate: f64,
}

/// Accuracy of the classifier within one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAccuracy {
    /// Canonical group label
    pub label: String,
    /// Number of subjects in the group
    pub count: usize,
    /// Fraction of subjects whose prediction matches the true label
    pub accuracy: f64,
}

/// Unsmoothed positive-prediction rate per group, ascending by rate.
///
/// Validates the same contract as [`DifferentialFairness::epsilon`]: equal
/// lengths and strictly binary predictions.
///
/// [`DifferentialFairness::epsilon`]: super::DifferentialFairness::epsilon
///
/// # Example
///
/// ```
/// use equidad::fairness::positive_rates;
///
/// let predictions = vec![1.0, 1.0, 0.0, 1.0];
/// let groups: Vec<String> = ["a", "a", "b", "b"]
///     .iter().map(|s| s.to_string()).collect();
///
/// let rates = positive_rates(&predictions, &groups).unwrap();
/// assert_eq!(rates[0].label, "b");
/// assert_eq!(rates[0].positive_rate, 0.5);
/// assert_eq!(rates[1].positive_rate, 1.0);
/// ```
pub fn positive_rates(predictions: &[f64], groups: &[String]) -> Result<Vec<GroupRate>> {
    validate_binary_aligned(predictions, groups)?;

    let mut rates: Vec<GroupRate> = tally_groups(predictions, groups)
        .into_iter()
        .map(|(label, (n, k))| GroupRate {
            label: label.to_string(),
            count: n,
            positive_rate: k as f64 / n as f64,
        })
        .collect();

    // Ascending by rate, label as the deterministic tie-break
    rates.sort_by(|a, b| {
        a.positive_rate
            .total_cmp(&b.positive_rate)
            .then_with(|| a.label.cmp(&b.label))
    });

    Ok(rates)
}

/// Accuracy of the classifier within a single group.
///
/// Returns `None` when no subject carries `group` — a group you did not
/// observe has no accuracy, rather than a zero one. Alignment of the three
/// slices is the caller's contract, as with the estimator.
pub fn group_accuracy(
    group: &str,
    groups: &[String],
    predictions: &[f64],
    truths: &[f64],
) -> Option<f64> {
    let mut n = 0usize;
    let mut correct = 0usize;
    for ((g, p), t) in groups.iter().zip(predictions).zip(truths) {
        if g == group {
            n += 1;
            if p == t {
                correct += 1;
            }
        }
    }
    if n == 0 {
        None
    } else {
        Some(correct as f64 / n as f64)
    }
}

/// Per-group accuracy for every observed group, ascending by accuracy.
///
/// Fails with [`Error::LengthMismatch`] when the three slices disagree in
/// length.
pub fn accuracy_by_group(
    predictions: &[f64],
    truths: &[f64],
    groups: &[String],
) -> Result<Vec<GroupAccuracy>> {
    if predictions.len() != groups.len() {
        return Err(Error::LengthMismatch {
            predictions: predictions.len(),
            groups: groups.len(),
        });
    }
    if truths.len() != predictions.len() {
        return Err(Error::LengthMismatch {
            predictions: truths.len(),
            groups: groups.len(),
        });
    }

    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
    for ((g, p), t) in groups.iter().zip(predictions).zip(truths) {
        let entry = tally.entry(g.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if p == t {
            entry.1 += 1;
        }
    }

    let mut accuracies: Vec<GroupAccuracy> = tally
        .into_iter()
        .map(|(label, (n, correct))| GroupAccuracy {
            label: label.to_string(),
            count: n,
            accuracy: correct as f64 / n as f64,
        })
        .collect();

    accuracies.sort_by(|a, b| {
        a.accuracy
            .total_cmp(&b.accuracy)
            .then_with(|| a.label.cmp(&b.label))
    });

    Ok(accuracies)
}
