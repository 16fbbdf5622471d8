//! Dataset parsers for activity networks
//!
//! Provides parsing from delimited text into typed records:
//! - Activity properties (headed table) via `ActivityParser`
//! - Precedence matrix (headerless grid) via `AdjacencyParser`
//!
//! Parsers never stop at the first defect. Every row is consumed and every
//! issue collected into a `ParseOutcome`; callers decide afterwards whether
//! the outcome is usable.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod activity;
mod adjacency;
mod table;

pub use activity::{ActivityColumns, ActivityParseState, ActivityParser};
pub use adjacency::{coerce_cell, is_binary_token, AdjacencyParser};

use actnet_core::{Activity, AdjacencyMatrix, DatasetKind, ValidationIssue};

/// Errors raised by the delimiter layer.
///
/// Row and cell defects are never errors; they are issues in the outcome.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The reader rejected the input.
    ///
    /// Not raised for in-memory UTF-8 text under the flexible reader the
    /// parsers build; surfaces as an I/O failure if a reader change lets it.
    #[error("{0}")]
    Csv(#[from] csv::Error),

    /// Delimiter is not a single ASCII character
    #[error("invalid delimiter: {0:?}")]
    InvalidDelimiter(char),
}

/// Parser trait for turning delimited text into records
///
/// Implement this trait to add support for new datasets.
pub trait DatasetParser {
    /// Record collection this parser produces
    type Output: RecordSet;

    /// Dataset this parser reads
    const KIND: DatasetKind;

    /// Parse content into records plus every issue found
    fn parse(&self, content: &str) -> Result<ParseOutcome<Self::Output>, ParseError>;
}

/// Record collections that can report their size
pub trait RecordSet {
    /// Number of records (rows)
    fn record_count(&self) -> usize;
}

impl RecordSet for Vec<Activity> {
    fn record_count(&self) -> usize {
        self.len()
    }
}

impl RecordSet for AdjacencyMatrix {
    fn record_count(&self) -> usize {
        self.row_count()
    }
}

/// Records and issues from one full pass over a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome<T> {
    /// Every record, including those with issues
    pub records: T,
    /// Every issue, in discovery order
    pub issues: Vec<ValidationIssue>,
}

/// Why an outcome cannot be reported as success
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// No records were produced
    Empty,
    /// Records were produced but issues were found
    Invalid(Vec<ValidationIssue>),
}

impl<T: RecordSet> ParseOutcome<T> {
    /// Accept the records only when the outcome is clean.
    ///
    /// Emptiness is checked first, so an empty dataset is never reported as a
    /// validation failure.
    pub fn into_validated(self) -> Result<T, Rejection> {
        if self.records.record_count() == 0 {
            return Err(Rejection::Empty);
        }
        if !self.issues.is_empty() {
            return Err(Rejection::Invalid(self.issues));
        }
        Ok(self.records)
    }
}

/// Convert a configured delimiter into the byte the reader expects
pub fn delimiter_byte(delimiter: char) -> Result<u8, ParseError> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(ParseError::InvalidDelimiter(delimiter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actnet_core::Code;

    #[test]
    fn empty_outcome_is_rejected_as_empty() {
        let outcome = ParseOutcome {
            records: Vec::<Activity>::new(),
            issues: vec![],
        };
        assert_eq!(outcome.into_validated(), Err(Rejection::Empty));
    }

    #[test]
    fn issues_reject_the_outcome() {
        let issue = ValidationIssue::new(Code::NodeIdMissing, "Node ID is empty");
        let outcome = ParseOutcome {
            records: vec![Activity::new("", None, None)],
            issues: vec![issue.clone()],
        };
        assert_eq!(outcome.into_validated(), Err(Rejection::Invalid(vec![issue])));
    }

    #[test]
    fn clean_outcome_yields_records() {
        let outcome = ParseOutcome {
            records: AdjacencyMatrix::from_rows(vec![vec![0.0]]),
            issues: vec![],
        };
        assert_eq!(outcome.into_validated().unwrap().row_count(), 1);
    }

    #[test]
    fn delimiter_must_be_ascii() {
        assert_eq!(delimiter_byte(',').unwrap(), b',');
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert!(matches!(delimiter_byte('é'), Err(ParseError::InvalidDelimiter('é'))));
    }
}
