//! Audit report assembly and export
//!
//! Bundles the outputs of one fairness audit — group sizes, per-group
//! positive rates, optional per-group accuracy, the small-group advisory,
//! and ε — into a single serializable [`FairnessReport`] for visualization
//! consumers and reporting code. JSON and CSV text exports mirror the shapes
//! downstream tooling expects.

use crate::fairness::{accuracy_by_group, positive_rates, DifferentialFairness};
use crate::groups::{GroupLabeler, Grouping};
use crate::frame::Frame;
use crate::Result;
use serde::Serialize;


/// Per-group line of a [`FairnessReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Canonical group label
    pub label: String,
    /// Number of subjects in the group
    pub count: usize,
    /// Unsmoothed `P(ŷ=1 | group)`
    pub positive_rate: f64,
    /// Within-group accuracy, when true labels were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// Complete output of one fairness audit.
#[derive(Debug, Clone, Serialize)]
pub struct FairnessReport {
    /// Protected columns the groups were built from
    pub protected: Vec<String>,
    /// Number of audited rows
    pub n_rows: usize,
    /// Differential Fairness ε
    pub epsilon: f64,
    /// Smoothing prior used for ε
    pub prior: f64,
    /// Per-group summaries, in the grouping's count order
    pub groups: Vec<GroupSummary>,
    /// Small-group advisory, when any group fell below the threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_group_warning: Option<String>,
}

impl FairnessReport {
    /// Export the report to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the per-group table to CSV text.
    pub fn to_csv(&self) -> String {
        let mut output = String::from("label,count,positive_rate,accuracy\n");
        for group in &self.groups {
            let accuracy = group
                .accuracy
                .map(|a| a.to_string())
                .unwrap_or_default();
            output.push_str(&format!(
                "{},{},{},{}\n",
                group.label, group.count, group.positive_rate, accuracy
            ));
        }
        output
    }
}

/// Run a full audit over a frame of protected attributes.
///
/// Composes the core: label rows, pair the labels with `predictions`,
/// compute per-group rates (and accuracy when `truths` is supplied), the
/// small-group advisory, and ε.
///
/// # Example
///
/// ```
/// use equidad::frame::{Frame, Value};
/// use equidad::groups::GroupLabeler;
/// use equidad::report::audit;
///
/// let frame = Frame::from_columns(vec![
///     ("Sex".to_string(), vec![Value::Int(1), Value::Int(0), Value::Int(1)]),
/// ]).unwrap();
/// let labeler = GroupLabeler::new(["Sex"]).unwrap();
///
/// let report = audit(&frame, &labeler, &[1.0, 0.0, 1.0], None, 1e-6, 20).unwrap();
/// assert_eq!(report.groups.len(), 2);
/// assert!(report.epsilon > 0.0);
/// ```
pub fn audit(
    frame: &Frame,
    labeler: &GroupLabeler,
    predictions: &[f64],
    truths: Option<&[f64]>,
    prior: f64,
    min_group_size: usize,
) -> Result<FairnessReport> {
    let grouping = labeler.label(frame)?;
    summarize(&grouping, predictions, truths, prior, min_group_size)
}

/// Assemble a report from an existing grouping and aligned predictions.
pub fn summarize(
    grouping: &Grouping,
    predictions: &[f64],
    truths: Option<&[f64]>,
    prior: f64,
    min_group_size: usize,
) -> Result<FairnessReport> {
    let epsilon = DifferentialFairness::new(prior).epsilon(predictions, &grouping.labels)?;
    let rates = positive_rates(predictions, &grouping.labels)?;
    let accuracies = match truths {
        Some(truths) => Some(accuracy_by_group(predictions, truths, &grouping.labels)?),
        None => None,
    };

    let groups = grouping
        .counts
        .iter()
        .map(|c| GroupSummary {
            label: c.label.clone(),
            count: c.count,
            positive_rate: rates
                .iter()
                .find(|r| r.label == c.label)
                .map(|r| r.positive_rate)
                .unwrap_or(0.0),
            accuracy: accuracies.as_ref().and_then(|accs| {
                accs.iter().find(|a| a.label == c.label).map(|a| a.accuracy)
            }),
        })
        .collect();

    Ok(FairnessReport {
        protected: grouping.protected.clone(),
        n_rows: grouping.n_rows(),
        epsilon,
        prior,
        groups,
        small_group_warning: grouping.warn_small_groups(min_group_size),
    })
}
