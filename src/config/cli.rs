//! CLI argument parsing
//!
//! This module provides the command-line interface for equidad audits.
//!
//! # Usage
//!
//! ```bash
//! equidad audit audit.yaml
//! equidad audit audit.yaml --format json
//! equidad audit audit.yaml --prior 1e-4 --min-group-size 30
//! equidad validate audit.yaml
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::AuditSpec;

/// Equidad: Group-Fairness Diagnostics
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "equidad")]
#[command(version)]
#[command(about = "Group-fairness diagnostics for binary classifiers over tabular data")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a fairness audit from a YAML configuration
    Audit(AuditArgs),

    /// Validate a configuration file without reading the dataset
    Validate(ValidateArgs),
}

/// Arguments for the audit command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AuditArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override the smoothing prior
    #[arg(long)]
    pub prior: Option<f64>,

    /// Override the small-group advisory threshold
    #[arg(long)]
    pub min_group_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show the resolved configuration
    #[arg(short, long)]
    pub detailed: bool,
}

/// Report output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table
    Text,
    /// FairnessReport JSON
    Json,
    /// Per-group CSV table
    Csv,
}

/// Apply command-line overrides on top of a loaded spec.
pub fn apply_overrides(spec: &mut AuditSpec, args: &AuditArgs) {
    if let Some(prior) = args.prior {
        spec.fairness.prior = prior;
    }
    if let Some(min_group_size) = args.min_group_size {
        spec.fairness.min_group_size = min_group_size;
    }
}
