//! Adjacency matrix parser
//!
//! Reads a headerless grid. Only the tokens `0` and `1` are valid; anything
//! else is reported with its coordinates and still kept as a best-effort
//! number so the matrix keeps its shape.

use crate::table;
use crate::{DatasetParser, ParseError, ParseOutcome};
use actnet_core::{AdjacencyMatrix, Code, DatasetKind, ValidationIssue};
use csv::StringRecord;
use serde_json::json;

/// True for the only two accepted cell tokens
#[inline]
#[must_use]
pub fn is_binary_token(token: &str) -> bool {
    matches!(token, "0" | "1")
}

/// Best-effort numeric reading of a cell.
///
/// Empty text reads as `0`, numeric text as its value, anything else as
/// `NaN`.
#[must_use]
pub fn coerce_cell(token: &str) -> f64 {
    let token = token.trim();
    if token.is_empty() {
        return 0.0;
    }
    token.parse().unwrap_or(f64::NAN)
}

/// Adjacency matrix parser
#[derive(Debug, Clone, Copy)]
pub struct AdjacencyParser {
    delimiter: u8,
}

impl Default for AdjacencyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjacencyParser {
    /// Create a comma-delimited parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Create a parser for another delimiter
    #[inline]
    #[must_use]
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Consume one row, appending it whatever its cells contain
    #[must_use]
    pub fn step(
        mut outcome: ParseOutcome<AdjacencyMatrix>,
        row: usize,
        record: &StringRecord,
    ) -> ParseOutcome<AdjacencyMatrix> {
        let mut cells = Vec::with_capacity(record.len());
        for (col, raw) in record.iter().enumerate() {
            let value = raw.trim();
            if !is_binary_token(value) {
                outcome.issues.push(
                    ValidationIssue::new(
                        Code::InvalidCellValue,
                        format!("Invalid value \"{value}\" at [row {row}, col {col}]"),
                    )
                    .with_meta(json!({ "row": row, "col": col, "value": value })),
                );
            }
            cells.push(coerce_cell(value));
        }
        outcome.records.push_row(cells);
        outcome
    }
}

impl DatasetParser for AdjacencyParser {
    type Output = AdjacencyMatrix;

    const KIND: DatasetKind = DatasetKind::Adjacency;

    fn parse(&self, content: &str) -> Result<ParseOutcome<Self::Output>, ParseError> {
        let mut rdr = table::reader(content, self.delimiter, false);
        let empty = ParseOutcome {
            records: AdjacencyMatrix::new(),
            issues: Vec::new(),
        };

        let outcome = rdr
            .records()
            .enumerate()
            .try_fold(empty, |outcome, (row, record)| {
                record.map(|r| Self::step(outcome, row, &r))
            })?;

        tracing::debug!(
            rows = outcome.records.row_count(),
            width = outcome.records.width(),
            issues = outcome.issues.len(),
            "parsed adjacency matrix"
        );
        Ok(outcome)
    }
}
