//! Error types for Equidad

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Protected-column configuration named columns the table does not have.
    /// Carries every missing name, not just the first.
    #[error("Protected columns not found: {missing:?}")]
    MissingColumns { missing: Vec<String> },

    #[error("Protected columns must be a non-empty list of column names")]
    EmptyProtected,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Length mismatch: {predictions} predictions vs {groups} group labels")]
    LengthMismatch { predictions: usize, groups: usize },

    #[error("Predictions must contain only binary values: 0 or 1")]
    NonBinaryPredictions,

    #[error("Malformed table: {0}")]
    MalformedTable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;
