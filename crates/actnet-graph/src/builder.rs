//! Link construction from parsed datasets

use crate::index::{position_id, NodeIndex};
use crate::network::PrecedenceNetwork;
use actnet_core::{Activity, AdjacencyMatrix, Code, Link, ValidationIssue};
use actnet_parsers::ParseOutcome;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Optional reporting layered over the default link scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Report cells and activities the scan had to skip
    pub report_unresolved: bool,
    /// Attach precedence network diagnostics
    pub diagnostics: bool,
}

impl GraphOptions {
    /// Set unresolved reporting
    #[must_use]
    pub fn with_report_unresolved(mut self, enabled: bool) -> Self {
        self.report_unresolved = enabled;
        self
    }

    /// Set network diagnostics
    #[must_use]
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

/// Links from one matrix scan plus what the scan skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkScan {
    /// Links in row-major cell order
    pub links: Vec<Link>,
    /// Skip reports, empty unless unresolved reporting is on
    pub warnings: Vec<ValidationIssue>,
}

/// Successful combined graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedGraph {
    /// Links in row-major cell order
    pub links: Vec<Link>,
    /// Network diagnostics
    pub diag: Vec<ValidationIssue>,
    /// Skip reports
    pub warnings: Vec<ValidationIssue>,
}

/// Why a combined graph could not be produced
#[derive(Debug, Clone, PartialEq)]
pub enum CompositionFailure {
    /// The activity dataset has no records
    NoActivities,
    /// The adjacency dataset has no rows
    NoAdjacencyRows,
    /// Either dataset reported issues; all of them, activities first
    Invalid(Vec<ValidationIssue>),
}

/// Builds precedence links from activities and an adjacency matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder {
    options: GraphOptions,
}

impl GraphBuilder {
    /// Create a builder with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with the given options
    #[must_use]
    pub fn with_options(options: GraphOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[must_use]
    pub fn options(&self) -> GraphOptions {
        self.options
    }

    /// Scan every `1` cell and emit a link for each resolvable, dated pair.
    ///
    /// Cells whose endpoints are unknown or undated are skipped. Skips are
    /// reported as warnings only when `report_unresolved` is set.
    #[must_use]
    pub fn scan(&self, activities: &[Activity], matrix: &AdjacencyMatrix) -> LinkScan {
        let index = NodeIndex::build(activities);
        let report = self.options.report_unresolved;
        let mut scan = LinkScan::default();

        if report {
            scan.warnings.extend(index.non_numeric().iter().map(|a| {
                ValidationIssue::new(
                    Code::NonNumericNodeId,
                    format!("Node ID \"{}\" cannot address a matrix cell", a.node_id),
                )
                .with_meta(json!({ "nodeId": a.node_id }))
            }));
            scan.warnings.extend(index.shadowed().iter().map(|(id, lost, won)| {
                ValidationIssue::new(
                    Code::ShadowedNodeId,
                    format!(
                        "Node ID \"{}\" is shadowed by \"{}\" at id {id}",
                        lost.node_id, won.node_id
                    ),
                )
                .with_meta(json!({ "nodeId": lost.node_id, "shadowedBy": won.node_id, "id": id }))
            }));
        }

        for (row, col) in matrix.linked_cells() {
            let (Some(from), Some(to)) = (index.at_position(row), index.at_position(col)) else {
                if report {
                    scan.warnings.push(unresolved(row, col));
                }
                continue;
            };

            match Link::between(from, to) {
                Some(link) => scan.links.push(link),
                None if report => scan.warnings.push(
                    ValidationIssue::new(
                        Code::UndatedLink,
                        format!("Link {} -> {} skipped: missing dates", from.node_id, to.node_id),
                    )
                    .with_meta(json!({ "fromId": from.node_id, "toId": to.node_id })),
                ),
                None => {}
            }
        }

        tracing::debug!(
            links = scan.links.len(),
            warnings = scan.warnings.len(),
            "scanned adjacency matrix"
        );
        scan
    }

    /// Combine both parse outcomes into a graph.
    ///
    /// Empty datasets are reported before issues. When any issue exists the
    /// links are withheld and every issue is returned instead.
    pub fn compose(
        &self,
        activities: ParseOutcome<Vec<Activity>>,
        matrix: ParseOutcome<AdjacencyMatrix>,
    ) -> Result<CombinedGraph, CompositionFailure> {
        let mut issues = activities.issues;
        issues.extend(matrix.issues);

        if activities.records.is_empty() {
            return Err(CompositionFailure::NoActivities);
        }
        if matrix.records.is_empty() {
            return Err(CompositionFailure::NoAdjacencyRows);
        }

        let LinkScan { links, warnings } = self.scan(&activities.records, &matrix.records);

        if !issues.is_empty() {
            return Err(CompositionFailure::Invalid(issues));
        }

        let diag = if self.options.diagnostics {
            PrecedenceNetwork::from_links(&links).diagnostics()
        } else {
            Vec::new()
        };

        Ok(CombinedGraph {
            links,
            diag,
            warnings,
        })
    }
}

fn unresolved(row: usize, col: usize) -> ValidationIssue {
    let (from_id, to_id) = (position_id(row), position_id(col));
    ValidationIssue::new(
        Code::UnresolvedReference,
        format!("Cell [row {row}, col {col}] has no matching activity"),
    )
    .with_meta(json!({ "row": row, "col": col, "fromId": from_id, "toId": to_id }))
}
