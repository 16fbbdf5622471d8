//! Activity properties parser
//!
//! Reads a headed table whose columns resolve, after header normalization, to
//! an identifier and a start/end date pair. Historical spellings of each
//! column are merged; per row the first non-empty alias wins.

use crate::table;
use crate::{DatasetParser, ParseError, ParseOutcome};
use actnet_core::{
    normalize_header, parse_calendar_date, Activity, Code, DatasetKind, ValidationIssue,
};
use csv::StringRecord;
use serde_json::json;
use std::collections::HashSet;

const ID_ALIASES: &[&str] = &["nodeid", "node_id", "id", "activity_id"];
const START_ALIASES: &[&str] = &["startdate", "start_date", "start"];
const END_ALIASES: &[&str] = &["enddate", "end_date", "end"];

/// Column positions for each activity field, in alias priority order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityColumns {
    /// Identifier columns
    pub id: Vec<usize>,
    /// Start date columns
    pub start: Vec<usize>,
    /// End date columns
    pub end: Vec<usize>,
}

impl ActivityColumns {
    /// Resolve field columns from raw header labels
    #[must_use]
    pub fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let normalized: Vec<String> = headers.into_iter().map(normalize_header).collect();
        let positions = |aliases: &[&str]| -> Vec<usize> {
            aliases
                .iter()
                .flat_map(|alias| {
                    normalized
                        .iter()
                        .enumerate()
                        .filter(move |(_, h)| h.as_str() == *alias)
                        .map(|(i, _)| i)
                })
                .collect()
        };

        Self {
            id: positions(ID_ALIASES),
            start: positions(START_ALIASES),
            end: positions(END_ALIASES),
        }
    }

    fn first_value<'r>(columns: &[usize], record: &'r StringRecord) -> Option<&'r str> {
        columns
            .iter()
            .filter_map(|&i| record.get(i))
            .find(|v| !v.trim().is_empty())
    }
}

/// Accumulator threaded through the row fold.
///
/// Holds everything a single parse needs to remember between rows, including
/// the identifiers seen so far. A fresh state is created per parse.
#[derive(Debug, Clone, Default)]
pub struct ActivityParseState {
    records: Vec<Activity>,
    issues: Vec<ValidationIssue>,
    seen: HashSet<String>,
}

impl ActivityParseState {
    /// Finish the fold
    #[must_use]
    pub fn into_outcome(self) -> ParseOutcome<Vec<Activity>> {
        ParseOutcome {
            records: self.records,
            issues: self.issues,
        }
    }
}

/// Activity properties parser
#[derive(Debug, Clone, Copy)]
pub struct ActivityParser {
    delimiter: u8,
}

impl Default for ActivityParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityParser {
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

    /// Consume one data row.
    ///
    /// The record is always appended, whatever issues it raises.
    #[must_use]
    pub fn step(
        columns: &ActivityColumns,
        mut state: ActivityParseState,
        row: usize,
        record: &StringRecord,
    ) -> ActivityParseState {
        let node_id = ActivityColumns::first_value(&columns.id, record)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let raw_start = ActivityColumns::first_value(&columns.start, record);
        let raw_end = ActivityColumns::first_value(&columns.end, record);

        if node_id.is_empty() {
            state.issues.push(
                ValidationIssue::new(Code::NodeIdMissing, "Node ID is empty")
                    .with_meta(json!({ "row": row })),
            );
        }
        if !state.seen.insert(node_id.clone()) {
            state.issues.push(
                ValidationIssue::new(Code::DuplicateNodeId, format!("Duplicate Node ID: {node_id}"))
                    .with_meta(json!({ "row": row, "nodeId": node_id })),
            );
        }

        let start_date = raw_start.and_then(parse_calendar_date);
        if start_date.is_none() {
            state
                .issues
                .push(date_issue(Code::InvalidStartDate, "startDate", row, &node_id, raw_start));
        }

        let end_date = raw_end.and_then(parse_calendar_date);
        if end_date.is_none() {
            state
                .issues
                .push(date_issue(Code::InvalidEndDate, "endDate", row, &node_id, raw_end));
        }

        state.records.push(Activity::new(node_id, start_date, end_date));
        state
    }
}

fn date_issue(
    code: Code,
    field: &str,
    row: usize,
    node_id: &str,
    raw: Option<&str>,
) -> ValidationIssue {
    let shown = raw.unwrap_or("(missing)");
    ValidationIssue::new(code, format!("Invalid {field}: {shown}"))
        .with_meta(json!({ "row": row, "nodeId": node_id, "value": raw }))
}

impl DatasetParser for ActivityParser {
    type Output = Vec<Activity>;

    const KIND: DatasetKind = DatasetKind::Activities;

    fn parse(&self, content: &str) -> Result<ParseOutcome<Self::Output>, ParseError> {
        let mut rdr = table::reader(content, self.delimiter, true);
        let columns = ActivityColumns::resolve(rdr.headers()?.iter());

        let state = rdr.records().enumerate().try_fold(
            ActivityParseState::default(),
            |state, (row, record)| record.map(|r| Self::step(&columns, state, row, &r)),
        )?;

        let outcome = state.into_outcome();
        tracing::debug!(
            rows = outcome.records.len(),
            issues = outcome.issues.len(),
            "parsed activity properties"
        );
        Ok(outcome)
    }
}
