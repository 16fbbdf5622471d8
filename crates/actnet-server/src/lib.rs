//! HTTP adapter for activity network operations
//!
//! | Method | Path                        | Operation          |
//! |--------|-----------------------------|--------------------|
//! | GET    | `/api/activity_properties`  | `GetActivities`    |
//! | GET    | `/api/adjacency_matrix`     | `GetAdjacency`     |
//! | GET    | `/api/pm_combined`          | `GetCombinedGraph` |
//!
//! Failures carry the JSON error report and the status of its code. Any
//! other route answers `404` with a `NOT_FOUND` report.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod routes;

pub use routes::{api, cors, handle_rejection, into_response, routes};
