//! Success bodies and the transport-neutral reply

use actnet_core::{Activity, AdjacencyMatrix, Code, DatasetError, ErrorReport, ValidationIssue};
use serde::Serialize;
use serde_json::{json, Value};

/// `GetActivities` success body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitiesResponse {
    /// Always `true`
    pub valid: bool,
    /// Always empty
    pub errors: Vec<ValidationIssue>,
    /// Activities in file order
    pub data: Vec<Activity>,
}

impl ActivitiesResponse {
    /// Wrap validated activities
    #[must_use]
    pub fn new(data: Vec<Activity>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            data,
        }
    }
}

/// `GetAdjacency` success body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjacencyResponse {
    /// Always `true`
    pub valid: bool,
    /// Always empty
    pub errors: Vec<ValidationIssue>,
    /// Matrix rows in file order
    pub matrix: AdjacencyMatrix,
}

impl AdjacencyResponse {
    /// Wrap a validated matrix
    #[must_use]
    pub fn new(matrix: AdjacencyMatrix) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            matrix,
        }
    }
}

/// Rendered outcome of one operation.
///
/// Carries the HTTP status and JSON body every transport needs; `code` is
/// `None` on success.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceReply {
    /// HTTP status
    pub status: u16,
    /// Failure code, `None` on success
    pub code: Option<Code>,
    /// JSON body
    pub body: Value,
}

impl ServiceReply {
    /// Success reply
    pub fn success<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self {
                status: 200,
                code: None,
                body,
            },
            Err(err) => Self::failure(&ErrorReport::new(
                Code::Internal,
                format!("failed to encode response: {err}"),
                Vec::new(),
            )),
        }
    }

    /// Failure reply
    pub fn failure(report: &ErrorReport) -> Self {
        let body = serde_json::to_value(report).unwrap_or_else(|_| {
            json!({
                "status": report.status,
                "code": report.code.as_str(),
                "message": report.message,
                "details": [],
            })
        });
        Self {
            status: report.http_status(),
            code: Some(report.code),
            body,
        }
    }

    /// Reply for an operation result
    pub fn from_result<T: Serialize>(result: &Result<T, DatasetError>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(err) => Self::failure(&err.report()),
        }
    }

    /// True for 2xx replies
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code.is_none()
    }

    /// Process exit code: 0 success, 2 absent files, 3 I/O, 1 otherwise
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.code.map(Code::http_status) {
            None => 0,
            Some(404) => 2,
            Some(500) => 3,
            Some(_) => 1,
        }
    }

    /// Serialize the body
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(&self.body)
        } else {
            serde_json::to_string(&self.body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn activities_body_shape() {
        let reply = ServiceReply::success(&ActivitiesResponse::new(vec![Activity::new("1", None, None)]));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.exit_code(), 0);
        assert_eq!(
            reply.to_json(false).unwrap(),
            r#"{"valid":true,"errors":[],"data":[{"nodeId":"1","startDate":null,"endDate":null}]}"#
        );
    }

    #[test]
    fn adjacency_body_shape() {
        let matrix = AdjacencyMatrix::from_rows(vec![vec![0.0, 1.0], vec![0.0]]);
        let reply = ServiceReply::success(&AdjacencyResponse::new(matrix));
        assert_eq!(reply.body, json!({"valid": true, "errors": [], "matrix": [[0, 1], [0]]}));
    }

    #[test]
    fn failure_carries_status_and_exit_code() {
        let result: Result<(), _> = Err(DatasetError::NotFound {
            dataset: actnet_core::DatasetKind::Adjacency,
            path: PathBuf::from("annexes/adjacency-matrix.csv"),
        });
        let reply = ServiceReply::from_result(&result);
        assert_eq!(reply.status, 404);
        assert_eq!(reply.exit_code(), 2);
        assert_eq!(
            reply.body,
            json!({
                "status": "error",
                "code": "AM_FILE_NOT_FOUND",
                "message": "adjacency-matrix.csv not found",
                "details": []
            })
        );
    }

    #[test]
    fn validation_failures_exit_with_one() {
        let result: Result<(), _> = Err(DatasetError::invalid(
            actnet_core::Operation::Activities,
            vec![ValidationIssue::new(Code::NodeIdMissing, "Node ID is empty")],
        ));
        let reply = ServiceReply::from_result(&result);
        assert_eq!(reply.status, 422);
        assert_eq!(reply.exit_code(), 1);
        assert_eq!(reply.body["code"], json!("AP_VALIDATION_ERROR"));
        assert_eq!(reply.body["details"][0]["code"], json!("AP_NODE_ID_MISSING"));
    }
}
