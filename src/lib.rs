//! # Equidad: Group-Fairness Diagnostics
//!
//! Equidad computes group-fairness diagnostics for binary classifier
//! predictions over tabular data with protected attributes: intersectional
//! group labels, per-group summary statistics, and the Differential
//! Fairness ε disparity metric.
//!
//! ## Architecture
//!
//! - **frame**: Minimal column-major table with named columns
//! - **groups**: Intersectional group labels, counts, small-group advisory
//! - **fairness**: Differential Fairness ε and per-group rate summaries
//! - **report**: Audit assembly and JSON/CSV export
//! - **config**: Declarative YAML audit configuration and CLI types
//!
//! ## Example
//!
//! ```
//! use equidad::fairness::DifferentialFairness;
//! use equidad::frame::{Frame, Value};
//! use equidad::groups::GroupLabeler;
//!
//! let frame = Frame::from_columns(vec![
//!     ("Sex".to_string(), vec![Value::Int(1), Value::Int(1), Value::Int(0)]),
//!     ("age_group".to_string(), vec![
//!         Value::from("older"), Value::from("young"), Value::from("older"),
//!     ]),
//! ]).unwrap();
//!
//! let labeler = GroupLabeler::new(["Sex", "age_group"]).unwrap();
//! let grouping = labeler.label(&frame).unwrap();
//! assert_eq!(grouping.labels[0], "Sex=1|age_group=older");
//!
//! // Predictions are aligned positionally with the labeled rows
//! let predictions = vec![1.0, 1.0, 0.0];
//! let epsilon = DifferentialFairness::default()
//!     .epsilon(&predictions, &grouping.labels)
//!     .unwrap();
//! assert!(epsilon.is_finite() && epsilon >= 0.0);
//! ```

pub mod config;
pub mod fairness;
pub mod frame;
pub mod groups;
pub mod report;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use fairness::{positive_rates, DifferentialFairness, GroupMetric};
pub use frame::{Frame, Value};
pub use groups::{warn_small_groups, GroupLabeler, Grouping};
pub use report::{audit, FairnessReport};
