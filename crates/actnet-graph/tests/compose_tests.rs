//! End-to-end composition from raw CSV text

use actnet_core::{Code, DAY_MS};
use actnet_graph::{CompositionFailure, GraphBuilder, GraphOptions};
use actnet_parsers::{ActivityParser, AdjacencyParser, DatasetParser};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

const ACTIVITIES: &str = "\
Node ID,Start Date,End Date
1,2020-01-01,2020-01-10
2,20/1/2020,25/1/2020
3,2020-02-01,2020-02-03
";

fn compose(
    activities: &str,
    matrix: &str,
    options: GraphOptions,
) -> Result<actnet_graph::CombinedGraph, CompositionFailure> {
    let activities = ActivityParser::new().parse(activities).unwrap();
    let matrix = AdjacencyParser::new().parse(matrix).unwrap();
    GraphBuilder::with_options(options).compose(activities, matrix)
}

#[test]
fn builds_links_from_csv() {
    let graph = compose(ACTIVITIES, "0,1,0\n0,0,1\n0,0,0\n", GraphOptions::default()).unwrap();

    let value = serde_json::to_value(&graph).unwrap();
    assert_eq!(
        value["links"][0],
        json!({
            "from": {"nodeId": "1", "startDate": "2020-01-01", "endDate": "2020-01-10"},
            "to": {"nodeId": "2", "startDate": "2020-01-20", "endDate": "2020-01-25"},
            "gapDays": 24
        })
    );
    assert_eq!(value["links"][1]["gapDays"], json!(14));
    assert_eq!(value["diag"], json!([]));
    assert_eq!(value["warnings"], json!([]));
}

#[test]
fn ragged_matrix_rows_are_scanned_as_is() {
    let graph = compose(ACTIVITIES, "0,1\n0,0,1\n", GraphOptions::default()).unwrap();
    assert_eq!(graph.links.len(), 2);
}

#[test]
fn issues_from_both_files_are_combined() {
    let activities = "nodeId,startDate,endDate\n1,2020-01-01,2020-01-10\n1,2020-01-20,2020-01-25\n";
    let result = compose(activities, "0,1\nx,0\n", GraphOptions::default());

    let Err(CompositionFailure::Invalid(issues)) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    let codes: Vec<Code> = issues.iter().map(|i| i.code).collect();
    assert_eq!(codes, vec![Code::DuplicateNodeId, Code::InvalidCellValue]);
}

#[test]
fn header_only_activities_report_no_activities() {
    let result = compose("nodeId,startDate,endDate\n", "0\n", GraphOptions::default());
    assert_eq!(result, Err(CompositionFailure::NoActivities));
}

#[test]
fn diagnostics_summarize_network() {
    let options = GraphOptions::default().with_diagnostics(true);
    let graph = compose(ACTIVITIES, "0,1,0\n0,0,1\n0,0,0\n", options).unwrap();

    assert_eq!(graph.diag.len(), 1);
    assert_eq!(
        graph.diag[0].meta,
        Some(json!({"nodes": 3, "links": 2, "entries": [1], "exits": [3]}))
    );
}

#[test]
fn composition_is_deterministic() {
    let options = GraphOptions::default()
        .with_diagnostics(true)
        .with_report_unresolved(true);
    let matrix = "0,1,1,1\n1,0,1,0\n0,1,0,0\n1,0,0,0\n";
    let first = serde_json::to_string(&compose(ACTIVITIES, matrix, options).unwrap()).unwrap();
    let second = serde_json::to_string(&compose(ACTIVITIES, matrix, options).unwrap()).unwrap();
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn every_link_matches_its_dates(
        cells in proptest::collection::vec(proptest::collection::vec(0u8..=1, 3), 3)
    ) {
        let matrix: String = cells
            .iter()
            .map(|row| row.iter().map(u8::to_string).collect::<Vec<_>>().join(","))
            .collect::<Vec<_>>()
            .join("\n");
        let graph = compose(ACTIVITIES, &matrix, GraphOptions::default()).unwrap();

        let ones = cells.iter().flatten().filter(|c| **c == 1).count();
        prop_assert_eq!(graph.links.len(), ones);

        for link in &graph.links {
            let from = link.from.earliest_date().unwrap();
            let to = link.to.latest_date().unwrap();
            let ms = actnet_core::epoch_millis(to) - actnet_core::epoch_millis(from);
            prop_assert_eq!(link.gap_days * DAY_MS, ms);
        }
    }
}
