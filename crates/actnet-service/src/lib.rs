//! Activity network service layer
//!
//! Ties configuration, storage and the pure crates together behind three
//! operations:
//!
//! | Operation          | Method                            | Success body          |
//! |--------------------|-----------------------------------|-----------------------|
//! | `GetActivities`    | [`NetworkService::activities`]     | `ActivitiesResponse`  |
//! | `GetAdjacency`     | [`NetworkService::adjacency`]      | `AdjacencyResponse`   |
//! | `GetCombinedGraph` | [`NetworkService::combined_graph`] | `CombinedGraph`       |
//!
//! Transports call [`NetworkService::run`] and forward the resulting
//! [`ServiceReply`].

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod logging;
mod response;
mod service;
mod source;

pub use config::{ActnetConfig, ConfigError, DatasetConfig, ServerConfig};
pub use response::{ActivitiesResponse, AdjacencyResponse, ServiceReply};
pub use service::NetworkService;
pub use source::{DatasetSource, FsSource};

pub use actnet_core::Operation;
pub use actnet_graph::{CombinedGraph, GraphOptions};
