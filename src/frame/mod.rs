//! Minimal column-major table for protected attributes and predictions
//!
//! Fairness diagnostics only need indexable-by-name column access, so this
//! module provides exactly that: a [`Frame`] of named columns whose cells are
//! [`Value`]s (integer, float, string, or missing). Heavyweight dataframe
//! libraries stay out of the dependency tree.
//!
//! # Example
//!
//! ```
//! use equidad::frame::{Frame, Value};
//!
//! let frame = Frame::from_columns(vec![
//!     ("Sex".to_string(), vec![Value::Int(1), Value::Int(0)]),
//!     ("age_group".to_string(), vec![Value::from("older"), Value::Missing]),
//! ]).unwrap();
//!
//! assert_eq!(frame.n_rows(), 2);
//! assert!(frame.has_column("Sex"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

mod csv;


// =============================================================================
// Value
// =============================================================================

/// A single table cell.
///
/// `Missing` is an explicit sentinel; a float NaN is also treated as missing
/// by [`Value::is_missing`], matching how tabular sources usually encode
/// absent numeric data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer cell
    Int(i64),
    /// Floating-point cell
    Float(f64),
    /// String cell
    Str(String),
    /// Missing cell
    Missing,
}

impl Value {
    /// Whether this cell carries no usable value (explicit sentinel or NaN).
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the cell, if one exists.
    ///
    /// Integers widen to `f64`, numeric strings parse, and missing cells
    /// yield `None`. Used to lift prediction/target columns out of a frame.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) if !f.is_nan() => Some(*f),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Missing => write!(f, ""),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

// =============================================================================
// Frame
// =============================================================================

/// A column-major table with named columns of equal length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Vec<Value>>,
    n_rows: usize,
}

impl Frame {
    /// Build a frame from `(name, column)` pairs.
    ///
    /// Fails if two columns share a name or have different lengths.
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>) -> crate::Result<Self> {
        let mut frame = Frame::default();
        for (name, column) in columns {
            frame.push_column(name, column)?;
        }
        Ok(frame)
    }

    /// Append one named column.
    pub fn push_column(&mut self, name: String, column: Vec<Value>) -> crate::Result<()> {
        if self.names.iter().any(|n| n == &name) {
            return Err(crate::Error::MalformedTable(format!(
                "duplicate column name: {name}"
            )));
        }
        if self.names.is_empty() {
            self.n_rows = column.len();
        } else if column.len() != self.n_rows {
            return Err(crate::Error::MalformedTable(format!(
                "column {name} has {} rows, expected {}",
                column.len(),
                self.n_rows
            )));
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Column names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// Whether the frame has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.names.is_empty()
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Lift a column into `f64`s, mapping unusable cells to NaN.
    ///
    /// Downstream validation (e.g. the binary-prediction check) is the
    /// gate that rejects NaN, so coercion itself never fails here.
    pub fn column_as_f64(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|col| col.iter().map(|v| v.to_f64().unwrap_or(f64::NAN)).collect())
    }
}
