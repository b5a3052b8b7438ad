//! Declarative YAML audit configuration
//!
//! An audit run is described by a YAML file naming the dataset, the
//! prediction column, the protected attributes, and the labeling/fairness
//! knobs. Loading and validation are separate steps so the CLI can check a
//! spec without touching the data.
//!
//! # Example
//!
//! ```yaml
//! data:
//!   path: heart.csv
//!   prediction: y_pred
//!   target: HeartDisease
//!
//! protected: [Sex, age_group]
//!
//! labels:
//!   missing_token: NA
//!
//! fairness:
//!   prior: 1e-6
//!   min_group_size: 20
//! ```

mod cli;


pub use cli::{apply_overrides, AuditArgs, Cli, Command, OutputFormat, ValidateArgs};

use crate::groups::{
    CountOrder, DEFAULT_KV_SEP, DEFAULT_MIN_GROUP_SIZE, DEFAULT_MISSING_TOKEN, DEFAULT_SEP,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete audit specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSpec {
    /// Dataset configuration
    pub data: DataSpec,

    /// Protected columns to intersect, in label order
    pub protected: Vec<String>,

    /// Label construction knobs
    #[serde(default)]
    pub labels: LabelSpec,

    /// Fairness estimation knobs
    #[serde(default)]
    pub fairness: FairnessSpec,
}

/// Dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSpec {
    /// Path to the CSV dataset
    pub path: PathBuf,

    /// Column holding the binary predictions
    pub prediction: String,

    /// Optional column holding the true labels (enables per-group accuracy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Label construction knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSpec {
    /// Separator between attribute pairs
    #[serde(default = "default_sep")]
    pub sep: String,

    /// Separator between attribute name and value
    #[serde(default = "default_kv_sep")]
    pub kv_sep: String,

    /// Stand-in for missing attribute values
    #[serde(default = "default_missing_token")]
    pub missing_token: String,

    /// Ordering of the emitted group counts
    #[serde(default)]
    pub count_order: CountOrder,
}

/// Fairness estimation knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FairnessSpec {
    /// Smoothing prior for the ε estimator
    #[serde(default = "default_prior")]
    pub prior: f64,

    /// Advisory threshold for small groups
    #[serde(default = "default_min_group_size")]
    pub min_group_size: usize,
}

fn default_sep() -> String {
    DEFAULT_SEP.to_string()
}

fn default_kv_sep() -> String {
    DEFAULT_KV_SEP.to_string()
}

fn default_missing_token() -> String {
    DEFAULT_MISSING_TOKEN.to_string()
}

fn default_prior() -> f64 {
    crate::fairness::DEFAULT_PRIOR
}

fn default_min_group_size() -> usize {
    DEFAULT_MIN_GROUP_SIZE
}

impl Default for LabelSpec {
    fn default() -> Self {
        Self {
            sep: default_sep(),
            kv_sep: default_kv_sep(),
            missing_token: default_missing_token(),
            count_order: CountOrder::default(),
        }
    }
}

impl Default for FairnessSpec {
    fn default() -> Self {
        Self {
            prior: default_prior(),
            min_group_size: default_min_group_size(),
        }
    }
}

/// Load an audit specification from a YAML file.
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<AuditSpec> {
    let text = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&text).map_err(|e| Error::Serialization(e.to_string()))
}

/// Validate an audit specification.
///
/// Checks:
/// - Protected column list is non-empty and free of duplicates
/// - Prediction column is named
/// - Smoothing prior is positive and finite
/// - Dataset path exists (skipped under test, where files may not)
pub fn validate_spec(spec: &AuditSpec) -> Result<()> {
    if spec.protected.is_empty() {
        return Err(Error::EmptyProtected);
    }

    for (i, name) in spec.protected.iter().enumerate() {
        if spec.protected[..i].contains(name) {
            return Err(Error::Config(format!("duplicate protected column: {name}")));
        }
    }

    if spec.data.prediction.is_empty() {
        return Err(Error::Config(
            "data.prediction must name a column".to_string(),
        ));
    }

    if !(spec.fairness.prior > 0.0 && spec.fairness.prior.is_finite()) {
        return Err(Error::Config(format!(
            "fairness.prior must be a positive finite number, got {}",
            spec.fairness.prior
        )));
    }

    #[cfg(not(test))]
    if !spec.data.path.exists() {
        return Err(Error::Config(format!(
            "dataset not found: {}",
            spec.data.path.display()
        )));
    }

    Ok(())
}

impl AuditSpec {
    /// Build the configured [`GroupLabeler`](crate::groups::GroupLabeler).
    pub fn labeler(&self) -> Result<crate::groups::GroupLabeler> {
        Ok(crate::groups::GroupLabeler::new(self.protected.clone())?
            .with_separators(self.labels.sep.clone(), self.labels.kv_sep.clone())
            .with_missing_token(self.labels.missing_token.clone())
            .with_count_order(self.labels.count_order))
    }
}
