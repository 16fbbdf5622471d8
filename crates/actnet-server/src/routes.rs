//! warp filters

use actnet_core::{Code, ErrorReport, Operation};
use actnet_service::config::validate_origin;
use actnet_service::{ConfigError, NetworkService, ServiceReply};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

const ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];
const ALLOWED_HEADERS: [&str; 2] = ["Content-Type", "Authorization"];

/// The three operation routes under `/api`
pub fn api(
    service: Arc<NetworkService>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let activities = operation("activity_properties", Operation::Activities, Arc::clone(&service));
    let adjacency = operation("adjacency_matrix", Operation::Adjacency, Arc::clone(&service));
    let combined = operation("pm_combined", Operation::CombinedGraph, service);

    warp::path("api").and(activities.or(adjacency).or(combined))
}

fn operation(
    segment: &'static str,
    op: Operation,
    service: Arc<NetworkService>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    warp::path(segment)
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::any().map(move || Arc::clone(&service)))
        .then(move |service: Arc<NetworkService>| async move {
            into_response(service.run(op).await)
        })
}

/// CORS policy for the configured origins
///
/// Origins are checked before they reach warp, which panics on one it
/// cannot parse.
pub fn cors(origins: &[String]) -> Result<warp::cors::Builder, ConfigError> {
    origins.iter().try_for_each(|origin| validate_origin(origin))?;
    Ok(warp::cors()
        .allow_origins(origins.iter().map(String::as_str))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS))
}

/// Full application with CORS, request tracing and JSON rejections
pub fn routes(
    service: Arc<NetworkService>,
    origins: &[String],
) -> Result<impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone, ConfigError> {
    Ok(api(service)
        .with(cors(origins)?)
        .with(warp::trace::request())
        .recover(handle_rejection))
}

/// Render a service reply as an HTTP response
pub fn into_response(reply: ServiceReply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    warp::reply::with_status(warp::reply::json(&reply.body), status).into_response()
}

/// Turn rejections into JSON error reports
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let report = if err.find::<warp::cors::CorsForbidden>().is_some() {
        ErrorReport::new(Code::Forbidden, "Origin not allowed", Vec::new())
    } else if err.is_not_found() || err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ErrorReport::new(Code::NotFound, "Route not found", Vec::new())
    } else {
        tracing::error!(?err, "unhandled rejection");
        ErrorReport::new(Code::Internal, "Internal server error", Vec::new())
    };
    Ok(into_response(ServiceReply::failure(&report)))
}
