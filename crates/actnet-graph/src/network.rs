//! Precedence network analysis over emitted links

use actnet_core::{Code, Link, ValidationIssue};
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use serde_json::json;

/// Directed graph of activity ids weighted by gap days
#[derive(Debug, Clone, Default)]
pub struct PrecedenceNetwork {
    graph: DiGraphMap<i64, i64>,
}

impl PrecedenceNetwork {
    /// Build from links; endpoints without a numeric id are ignored
    #[must_use]
    pub fn from_links(links: &[Link]) -> Self {
        let mut graph = DiGraphMap::new();
        for link in links {
            if let (Some(from), Some(to)) = (link.from.numeric_id(), link.to.numeric_id()) {
                graph.add_edge(from, to, link.gap_days);
            }
        }
        Self { graph }
    }

    /// Number of activities taking part in at least one link
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct links
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Activities with no predecessors, ascending
    pub fn entry_nodes(&self) -> Vec<i64> {
        self.boundary(Direction::Incoming)
    }

    /// Activities with no successors, ascending
    pub fn exit_nodes(&self) -> Vec<i64> {
        self.boundary(Direction::Outgoing)
    }

    fn boundary(&self, direction: Direction) -> Vec<i64> {
        let mut nodes: Vec<i64> = self
            .graph
            .nodes()
            .filter(|n| self.graph.neighbors_directed(*n, direction).next().is_none())
            .collect();
        nodes.sort_unstable();
        nodes
    }

    /// `(from, to, gap)` for every link with a negative gap, ascending
    pub fn backward_edges(&self) -> Vec<(i64, i64, i64)> {
        let mut edges: Vec<(i64, i64, i64)> = self
            .graph
            .all_edges()
            .filter(|(_, _, gap)| **gap < 0)
            .map(|(from, to, gap)| (from, to, *gap))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Groups of activities that precede each other, each sorted ascending
    pub fn cycles(&self) -> Vec<Vec<i64>> {
        let mut cycles: Vec<Vec<i64>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|n| self.graph.contains_edge(*n, *n))
            })
            .map(|mut component| {
                component.sort_unstable();
                component
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Summary, backward links and cycles as report entries
    pub fn diagnostics(&self) -> Vec<ValidationIssue> {
        let mut diag = vec![ValidationIssue::new(
            Code::NetworkSummary,
            format!(
                "{} linked activities, {} links",
                self.node_count(),
                self.edge_count()
            ),
        )
        .with_meta(json!({
            "nodes": self.node_count(),
            "links": self.edge_count(),
            "entries": self.entry_nodes(),
            "exits": self.exit_nodes(),
        }))];

        let backward = self.backward_edges();
        if !backward.is_empty() {
            diag.push(
                ValidationIssue::new(
                    Code::BackwardLinks,
                    format!("{} backward link(s)", backward.len()),
                )
                .with_meta(json!({
                    "count": backward.len(),
                    "links": backward
                        .iter()
                        .map(|(from, to, gap)| json!({"from": from, "to": to, "gapDays": gap}))
                        .collect::<Vec<_>>(),
                })),
            );
        }

        for cycle in self.cycles() {
            let path = cycle
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            diag.push(
                ValidationIssue::new(Code::Cycle, format!("Precedence cycle through {path}"))
                    .with_meta(json!({ "nodes": cycle })),
            );
        }

        diag
    }
}
