//! CSV ingestion for [`Frame`]
//!
//! Header row names the columns; cells are typed by successive parse
//! attempts (int, float, string). Empty cells and the usual missing-value
//! spellings (`NA`, `NaN`, `null`) become [`Value::Missing`]. Double-quoted
//! fields may contain commas and doubled quotes.

use super::{Frame, Value};
use crate::{Error, Result};
use std::fs;
use std::path::Path;

impl Frame {
    /// Read a CSV file into a frame.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Frame::parse_csv(&text)
    }

    /// Parse CSV text into a frame.
    pub fn parse_csv(text: &str) -> Result<Self> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());

        let header = lines
            .next()
            .ok_or_else(|| Error::MalformedTable("empty CSV input".to_string()))?;
        let names = split_record(header);
        if names.iter().any(|n| n.is_empty()) {
            return Err(Error::MalformedTable(
                "CSV header contains an empty column name".to_string(),
            ));
        }

        let mut columns: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
        for (line_no, line) in lines.enumerate() {
            let fields = split_record(line);
            if fields.len() != names.len() {
                return Err(Error::MalformedTable(format!(
                    "row {} has {} fields, expected {}",
                    line_no + 2,
                    fields.len(),
                    names.len()
                )));
            }
            for (column, field) in columns.iter_mut().zip(&fields) {
                column.push(parse_cell(field));
            }
        }

        Frame::from_columns(names.into_iter().zip(columns).collect())
    }
}

/// Split one CSV record, honouring double-quoted fields.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // Doubled quote inside a quoted field is a literal quote
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields.iter().map(|f| f.trim().to_string()).collect()
}

fn parse_cell(field: &str) -> Value {
    if field.is_empty() || matches!(field, "NA" | "NaN" | "nan" | "null") {
        return Value::Missing;
    }
    if let Ok(i) = field.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = field.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Str(field.to_string())
}
