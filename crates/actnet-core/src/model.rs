//! Activity network data model
//!
//! # Invariants
//! - An `Activity` with an absent date is still a valid record; absence is
//!   reported separately as a validation issue.
//! - `AdjacencyMatrix` rows may differ in length; every accessor tolerates
//!   short rows.
//! - `Link` values are derived per request and never stored.

use crate::dates;
use chrono::NaiveDate;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// A scheduled work item with an identifier and a date span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Identifier as written in the source, trimmed
    pub node_id: String,
    /// Normalized start date, `None` when missing or invalid
    pub start_date: Option<NaiveDate>,
    /// Normalized end date, `None` when missing or invalid
    pub end_date: Option<NaiveDate>,
}

impl Activity {
    /// Create an activity record
    #[inline]
    #[must_use]
    pub fn new(
        node_id: impl Into<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            start_date,
            end_date,
        }
    }

    /// Identifier coerced to an integer.
    ///
    /// Accepts any decimal notation that denotes a whole number (`"7"`,
    /// `"7.0"`, `"+7"`, `"7e0"`). Empty and non-numeric identifiers yield
    /// `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn numeric_id(&self) -> Option<i64> {
        let id = self.node_id.trim();
        if id.is_empty() {
            return None;
        }
        let value: f64 = id.parse().ok()?;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
            Some(value as i64)
        } else {
            None
        }
    }

    /// Earliest present date of the span
    #[must_use]
    pub fn earliest_date(&self) -> Option<NaiveDate> {
        match (self.start_date, self.end_date) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Latest present date of the span
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        match (self.start_date, self.end_date) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Binary precedence matrix as parsed, one `f64` per cell.
///
/// Valid cells hold `0.0` or `1.0`. Cells that failed validation hold their
/// best-effort numeric coercion, `NaN` when the text is not a number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyMatrix {
    rows: Vec<Vec<f64>>,
}

impl AdjacencyMatrix {
    /// Create an empty matrix
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from rows
    #[inline]
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Append a row
    #[inline]
    pub fn push_row(&mut self, row: Vec<f64>) {
        self.rows.push(row);
    }

    /// Rows in arrival order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when no rows were parsed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of the longest row
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell value, `None` when the row is missing or too short
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// True when cell `(row, col)` exists and holds `1`
    #[must_use]
    pub fn is_linked(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(|v| v == 1.0)
    }

    /// Coordinates of every cell holding `1`, in row-major order
    pub fn linked_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v == 1.0)
                .map(move |(c, _)| (r, c))
        })
    }
}

impl Serialize for AdjacencyMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&CellRow(row))?;
        }
        seq.end()
    }
}

struct CellRow<'a>(&'a [f64]);

impl Serialize for CellRow<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for &cell in self.0 {
            if !cell.is_finite() {
                seq.serialize_element(&Option::<f64>::None)?;
            } else if cell.fract() == 0.0 && cell.abs() < 9.0e15 {
                seq.serialize_element(&(cell as i64))?;
            } else {
                seq.serialize_element(&cell)?;
            }
        }
        seq.end()
    }
}

/// Directed precedence link between two activities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Predecessor
    pub from: Activity,
    /// Successor
    pub to: Activity,
    /// Days from the predecessor's earliest date to the successor's latest
    pub gap_days: i64,
}

impl Link {
    /// Build a link, computing the gap from the endpoints' dates.
    ///
    /// Returns `None` when either endpoint has no usable date.
    #[must_use]
    pub fn between(from: &Activity, to: &Activity) -> Option<Self> {
        let earliest_from = from.earliest_date()?;
        let latest_to = to.latest_date()?;
        Some(Self {
            from: from.clone(),
            to: to.clone(),
            gap_days: dates::gap_days(earliest_from, latest_to),
        })
    }

    /// Successor finishes before the predecessor starts
    #[inline]
    #[must_use]
    pub fn is_backward(&self) -> bool {
        self.gap_days < 0
    }
}
