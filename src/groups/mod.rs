//! Intersectional group construction
//!
//! Builds one canonical group label per table row from the declared
//! protected attributes, plus a label -> attribute map and per-label counts:
//!
//! - **GroupLabeler**: validated protected-column configuration + labeling
//! - **Grouping**: aligned labels, representative map, ordered counts
//! - **warn_small_groups**: advisory for groups too small to estimate well
//!
//! # Example
//!
//! ```
//! use equidad::frame::{Frame, Value};
//! use equidad::groups::GroupLabeler;
//!
//! let frame = Frame::from_columns(vec![
//!     ("Sex".to_string(), vec![Value::Int(1), Value::Int(1), Value::Int(0)]),
//!     ("age_group".to_string(), vec![
//!         Value::from("older"), Value::from("older"), Value::from("young"),
//!     ]),
//! ]).unwrap();
//!
//! let labeler = GroupLabeler::new(["Sex", "age_group"]).unwrap();
//! let grouping = labeler.label(&frame).unwrap();
//!
//! assert_eq!(grouping.labels[0], "Sex=1|age_group=older");
//! assert_eq!(grouping.count_of("Sex=1|age_group=older"), Some(2));
//! ```

use crate::frame::{Frame, Value};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};


/// Default separator between `key=value` pairs in a label.
pub const DEFAULT_SEP: &str = "|";

/// Default separator between an attribute name and its value.
pub const DEFAULT_KV_SEP: &str = "=";

/// Default stand-in for missing attribute values.
pub const DEFAULT_MISSING_TOKEN: &str = "NA";

/// Default advisory threshold for small intersectional groups.
pub const DEFAULT_MIN_GROUP_SIZE: usize = 20;

// =============================================================================
// GroupLabeler
// =============================================================================

/// Ordering of the per-group counts in a [`Grouping`].
///
/// Both orderings carry the same counts; only presentation differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountOrder {
    /// Largest groups first (ties keep first-seen order).
    #[default]
    Descending,
    /// Order in which each label first appears in the table.
    FirstSeen,
}

/// Builds intersectional group labels from protected-attribute columns.
///
/// The declared column order is part of the configuration: labels join the
/// `{column}{kv_sep}{value}` fragments in exactly that order, so two rows get
/// the same label iff their normalized values agree in every declared column.
#[derive(Debug, Clone)]
pub struct GroupLabeler {
    protected: Vec<String>,
    sep: String,
    kv_sep: String,
    missing_token: String,
    count_order: CountOrder,
}

impl GroupLabeler {
    /// Create a labeler over the given protected columns, in order.
    ///
    /// Fails with [`Error::EmptyProtected`] when no columns are declared.
    pub fn new<I, S>(protected: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let protected: Vec<String> = protected.into_iter().map(Into::into).collect();
        if protected.is_empty() {
            return Err(Error::EmptyProtected);
        }
        Ok(Self {
            protected,
            sep: DEFAULT_SEP.to_string(),
            kv_sep: DEFAULT_KV_SEP.to_string(),
            missing_token: DEFAULT_MISSING_TOKEN.to_string(),
            count_order: CountOrder::default(),
        })
    }

    /// Override the between-pair and key/value separators.
    pub fn with_separators(mut self, sep: impl Into<String>, kv_sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self.kv_sep = kv_sep.into();
        self
    }

    /// Override the token substituted for missing values.
    pub fn with_missing_token(mut self, token: impl Into<String>) -> Self {
        self.missing_token = token.into();
        self
    }

    /// Override the ordering of the emitted counts.
    pub fn with_count_order(mut self, order: CountOrder) -> Self {
        self.count_order = order;
        self
    }

    /// The declared protected columns, in label order.
    pub fn protected(&self) -> &[String] {
        &self.protected
    }

    /// Label every row of `frame` and summarize the groups.
    ///
    /// Column resolution happens once, upfront; a missing column never
    /// surfaces as a mid-iteration failure. The returned labels are aligned
    /// with the frame's row order, which is what lets callers pair them with
    /// a prediction vector produced from the same rows.
    pub fn label(&self, frame: &Frame) -> Result<Grouping> {
        let mut missing: Vec<String> = Vec::new();
        let mut resolved: Vec<&[Value]> = Vec::with_capacity(self.protected.len());
        for name in &self.protected {
            match frame.column(name) {
                Some(col) => resolved.push(col),
                None => missing.push(name.clone()),
            }
        }
        if !missing.is_empty() {
            return Err(Error::MissingColumns { missing });
        }

        let mut labels: Vec<String> = Vec::with_capacity(frame.n_rows());
        let mut group_map: HashMap<String, BTreeMap<String, Value>> = HashMap::new();
        let mut counts: Vec<GroupCount> = Vec::new();
        let mut count_index: HashMap<String, usize> = HashMap::new();

        for row in 0..frame.n_rows() {
            let label = self.label_row(&resolved, row);

            match count_index.get(&label) {
                Some(&i) => counts[i].count += 1,
                None => {
                    // First sighting of this label: record the representative
                    // attribute map. Later rows with the same label carry
                    // identical normalized values, so first-seen wins is safe.
                    let mapping = self
                        .protected
                        .iter()
                        .zip(&resolved)
                        .map(|(name, col)| (name.clone(), self.normalize(&col[row])))
                        .collect();
                    group_map.insert(label.clone(), mapping);
                    count_index.insert(label.clone(), counts.len());
                    counts.push(GroupCount {
                        label: label.clone(),
                        count: 1,
                    });
                }
            }
            labels.push(label);
        }

        if self.count_order == CountOrder::Descending {
            // Stable sort: equal counts keep first-seen order
            counts.sort_by(|a, b| b.count.cmp(&a.count));
        }

        Ok(Grouping {
            labels,
            group_map,
            counts,
            protected: self.protected.clone(),
        })
    }

    fn label_row(&self, resolved: &[&[Value]], row: usize) -> String {
        let parts: Vec<String> = self
            .protected
            .iter()
            .zip(resolved)
            .map(|(name, col)| {
                format!("{}{}{}", name, self.kv_sep, self.normalize(&col[row]))
            })
            .collect();
        parts.join(&self.sep)
    }

    fn normalize(&self, value: &Value) -> Value {
        if value.is_missing() {
            Value::Str(self.missing_token.clone())
        } else {
            value.clone()
        }
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// Size of one intersectional group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    /// Canonical group label
    pub label: String,
    /// Number of rows sharing the label
    pub count: usize,
}

/// Result of labeling one table: aligned labels, representative attribute
/// map, and ordered group sizes.
#[derive(Debug, Clone, Serialize)]
pub struct Grouping {
    /// One label per input row, in input row order
    pub labels: Vec<String>,
    /// Label -> (attribute -> normalized value), one entry per distinct label
    pub group_map: HashMap<String, BTreeMap<String, Value>>,
    /// Group sizes, ordered per the labeler's [`CountOrder`]
    pub counts: Vec<GroupCount>,
    /// Protected columns the labels were built from
    pub protected: Vec<String>,
}

impl Grouping {
    /// Number of distinct groups.
    pub fn n_groups(&self) -> usize {
        self.counts.len()
    }

    /// Number of labeled rows.
    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    /// Size of one group, if it exists.
    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.counts.iter().find(|c| c.label == label).map(|c| c.count)
    }

    /// Advisory message listing groups below `min_size`, if any.
    pub fn warn_small_groups(&self, min_size: usize) -> Option<String> {
        warn_small_groups(&self.counts, min_size)
    }

    /// Export the grouping summary to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// =============================================================================
// Small-group advisory
// =============================================================================

/// Format an advisory listing every group smaller than `min_size`.
///
/// Returns `None` when all groups are large enough. Small groups produce
/// unstable fairness estimates even with smoothing; the caller may merge
/// rare categories, drop attributes, or raise the smoothing prior.
///
/// # Example
///
/// ```
/// use equidad::groups::{warn_small_groups, GroupCount};
///
/// let counts = vec![
///     GroupCount { label: "A".to_string(), count: 25 },
///     GroupCount { label: "B".to_string(), count: 5 },
/// ];
/// let msg = warn_small_groups(&counts, 20).unwrap();
/// assert!(msg.contains("B (n=5)"));
/// assert!(!msg.contains("A (n="));
/// ```
pub fn warn_small_groups(counts: &[GroupCount], min_size: usize) -> Option<String> {
    let small: Vec<String> = counts
        .iter()
        .filter(|c| c.count < min_size)
        .map(|c| format!("{} (n={})", c.label, c.count))
        .collect();

    if small.is_empty() {
        None
    } else {
        Some(format!(
            "Small intersectional groups detected (<{min_size}): {}",
            small.join(", ")
        ))
    }
}
