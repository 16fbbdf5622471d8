//! Operation tests against fixture data directories

use actnet_core::{Code, DatasetError};
use actnet_service::{ActnetConfig, GraphOptions, Operation};
use actnet_test_utils::{
    DatasetFixture, MemorySource, ACTIVITY_FILE, ADJACENCY_FILE, SAMPLE_ADJACENCY,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn activities_are_served_in_file_order() {
    let fixture = DatasetFixture::empty().with_activities(
        "nodeId,startDate,endDate\n3,2020-01-05,2020-01-06\n1,5/1/2020,6/1/2020\n",
    );
    let reply = fixture.service().run(Operation::Activities).await;

    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.body,
        json!({
            "valid": true,
            "errors": [],
            "data": [
                {"nodeId": "3", "startDate": "2020-01-05", "endDate": "2020-01-06"},
                {"nodeId": "1", "startDate": "2020-01-05", "endDate": "2020-01-06"}
            ]
        })
    );
}

#[tokio::test]
async fn duplicate_ids_are_reported_once() {
    let fixture = DatasetFixture::empty().with_activities(
        "nodeId,startDate,endDate\n5,2020-01-01,2020-01-02\n5,2020-01-03,2020-01-04\n",
    );
    let err = fixture.service().activities().await.unwrap_err();

    let DatasetError::Invalid { issues, .. } = &err else {
        panic!("expected validation failure, got {err:?}");
    };
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, Code::DuplicateNodeId);
    assert_eq!(issues[0].meta, Some(json!({"row": 1, "nodeId": "5"})));
    assert_eq!(err.code(), Code::ActivityValidation);
}

#[tokio::test]
async fn every_activity_issue_is_reported() {
    let fixture = DatasetFixture::empty()
        .with_activities("nodeId,startDate,endDate\n,2020-01-01,2020-01-02\n2,2013-02-29,later\n");
    let reply = fixture.service().run(Operation::Activities).await;

    assert_eq!(reply.status, 422);
    assert_eq!(reply.body["code"], json!("AP_VALIDATION_ERROR"));
    let codes: Vec<&str> = reply.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["code"].as_str().unwrap())
        .collect();
    assert_eq!(
        codes,
        vec!["AP_NODE_ID_MISSING", "AP_INVALID_START_DATE", "AP_INVALID_END_DATE"]
    );
}

#[tokio::test]
async fn invalid_cell_is_located() {
    let fixture = DatasetFixture::empty().with_adjacency("0,1\n1,0\nx,0\n");
    let reply = fixture.service().run(Operation::Adjacency).await;

    assert_eq!(reply.status, 422);
    assert_eq!(
        reply.body,
        json!({
            "status": "error",
            "code": "AM_INVALID_CELL_VALUE",
            "message": "Adjacency matrix has invalid cells",
            "details": [{
                "code": "AM_INVALID_CELL_VALUE",
                "message": "Invalid value \"x\" at [row 2, col 0]",
                "meta": {"row": 2, "col": 0, "value": "x"}
            }]
        })
    );
}

#[tokio::test]
async fn adjacency_matrix_is_served() {
    let fixture = DatasetFixture::sample();
    let response = fixture.service().adjacency().await.unwrap();
    assert_eq!(response.matrix.row_count(), 3);
    assert!(response.matrix.is_linked(1, 2));
}

#[tokio::test]
async fn empty_files_have_their_own_codes() {
    let fixture = DatasetFixture::empty()
        .with_activities("nodeId,startDate,endDate\n")
        .with_adjacency("");
    let service = fixture.service();

    let activities = service.run(Operation::Activities).await;
    assert_eq!(activities.body["code"], json!("AP_EMPTY"));
    assert_eq!(activities.status, 422);

    let adjacency = service.run(Operation::Adjacency).await;
    assert_eq!(adjacency.body["code"], json!("AM_EMPTY"));

    let combined = service.run(Operation::CombinedGraph).await;
    assert_eq!(combined.body["code"], json!("PM_NO_ACTIVITIES"));
}

#[tokio::test]
async fn combined_reports_missing_matrix_rows() {
    let fixture = DatasetFixture::sample().with_adjacency("\n\n");
    let reply = fixture.service().run(Operation::CombinedGraph).await;
    assert_eq!(reply.body["code"], json!("PM_NO_ADJACENCY_ROWS"));
    assert_eq!(reply.body["message"], json!("No rows parsed from adjacency-matrix.csv"));
}

#[tokio::test]
async fn absent_file_is_not_found() {
    let fixture = DatasetFixture::empty();
    let reply = fixture.service().run(Operation::Activities).await;

    assert_eq!(reply.status, 404);
    assert_eq!(reply.exit_code(), 2);
    assert_eq!(
        reply.body,
        json!({
            "status": "error",
            "code": "AP_FILE_NOT_FOUND",
            "message": "activity-properties.csv not found",
            "details": []
        })
    );
}

#[tokio::test]
async fn combined_names_only_the_absent_file() {
    let fixture = DatasetFixture::sample();
    fixture.remove(ADJACENCY_FILE);
    let reply = fixture.service().run(Operation::CombinedGraph).await;

    assert_eq!(reply.status, 404);
    assert_eq!(
        reply.body,
        json!({
            "status": "error",
            "code": "PM_FILES_MISSING",
            "message": "Required CSV file(s) missing",
            "details": [
                {"code": "AM_FILE_NOT_FOUND", "message": "adjacency-matrix.csv not found"}
            ]
        })
    );
}

#[tokio::test]
async fn combined_names_both_absent_files() {
    let reply = DatasetFixture::empty()
        .service()
        .run(Operation::CombinedGraph)
        .await;

    let codes: Vec<&str> = reply.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["AP_FILE_NOT_FOUND", "AM_FILE_NOT_FOUND"]);
}

#[tokio::test]
async fn combined_graph_links_dated_activities() {
    let fixture = DatasetFixture::empty()
        .with_activities("nodeId,startDate,endDate\n1,2020-01-01,2020-01-10\n2,2020-01-20,2020-01-25\n")
        .with_adjacency("0,1\n0,0\n");
    let graph = fixture.service().combined_graph().await.unwrap();

    assert_eq!(graph.links.len(), 1);
    assert_eq!(graph.links[0].gap_days, 24);
    assert!(graph.diag.is_empty());
    assert!(graph.warnings.is_empty());
}

#[tokio::test]
async fn combined_withholds_links_on_any_issue() {
    let fixture = DatasetFixture::sample().with_adjacency("0,1,0\n0,0,yes\n0,0,0\n");
    let reply = fixture.service().run(Operation::CombinedGraph).await;

    assert_eq!(reply.status, 422);
    assert_eq!(reply.body["code"], json!("PM_VALIDATION_ERROR"));
    assert!(reply.body.get("links").is_none());
    assert_eq!(reply.body["details"][0]["meta"], json!({"row": 1, "col": 2, "value": "yes"}));
}

#[tokio::test]
async fn repeated_calls_are_byte_identical() {
    let fixture = DatasetFixture::sample().with_graph(
        GraphOptions::default()
            .with_diagnostics(true)
            .with_report_unresolved(true),
    );
    let service = fixture.service();

    for operation in [Operation::Activities, Operation::Adjacency, Operation::CombinedGraph] {
        let first = service.run(operation).await.to_json(false).unwrap();
        let second = service.run(operation).await.to_json(false).unwrap();
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn unreadable_content_is_an_io_error() {
    let fixture = DatasetFixture::sample();
    fixture.write(ACTIVITY_FILE, &[0xff, 0xfe, 0xfd]);
    let reply = fixture.service().run(Operation::Activities).await;

    assert_eq!(reply.status, 500);
    assert_eq!(reply.body["code"], json!("IO_ERROR"));
    assert_eq!(reply.exit_code(), 3);
}

#[tokio::test]
async fn optional_reports_are_opt_in() {
    let adjacency = "0,1,0,1\n0,0,1,0\n0,0,0,0\n";
    let plain = DatasetFixture::sample().with_adjacency(adjacency);
    let graph = plain.service().combined_graph().await.unwrap();
    assert!(graph.warnings.is_empty());
    assert_eq!(graph.links.len(), 2);

    let reporting = DatasetFixture::sample()
        .with_adjacency(adjacency)
        .with_graph(GraphOptions::default().with_report_unresolved(true).with_diagnostics(true));
    let graph = reporting.service().combined_graph().await.unwrap();
    assert_eq!(graph.links.len(), 2);
    assert_eq!(graph.warnings.len(), 1);
    assert_eq!(graph.warnings[0].code, Code::UnresolvedReference);
    assert_eq!(graph.diag[0].code, Code::NetworkSummary);
}

#[tokio::test]
async fn memory_source_behaves_like_disk() {
    let service = MemorySource::sample().service(&ActnetConfig::default());
    let graph = service.combined_graph().await.unwrap();
    let gaps: Vec<i64> = graph.links.iter().map(|l| l.gap_days).collect();
    assert_eq!(gaps, vec![24, 14]);

    let missing = MemorySource::new()
        .with_file(ADJACENCY_FILE, SAMPLE_ADJACENCY)
        .service(&ActnetConfig::default());
    let err = missing.combined_graph().await.unwrap_err();
    assert_eq!(err.code(), Code::FilesMissing);
    assert_eq!(err.details().len(), 1);
    assert_eq!(err.details()[0].code, Code::ActivityFileNotFound);
}

#[tokio::test]
async fn semicolon_delimiter_from_config() {
    let fixture = DatasetFixture::empty()
        .with_activities("Node ID;Start Date;End Date\n1;2020-01-01;2020-01-02\n")
        .with_adjacency("0;0\n0;0\n");
    let config = ActnetConfig::from_toml_str(&format!(
        "[dataset]\ndata_dir = {:?}\ndelimiter = \";\"\n",
        fixture.path().display().to_string()
    ))
    .unwrap();
    let service = actnet_service::NetworkService::new(&config).unwrap();

    assert!(service.activities().await.is_ok());
    assert!(service.adjacency().await.is_ok());
    assert_eq!(fixture.file(ACTIVITY_FILE), service.location(actnet_core::DatasetKind::Activities));
}
