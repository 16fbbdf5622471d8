//! Precedence graph construction for activity networks
//!
//! Joins parsed activities with an adjacency matrix:
//!
//! ```text
//! ParseOutcome<Vec<Activity>> ─┐
//!                              ├─> GraphBuilder::compose ─> CombinedGraph
//! ParseOutcome<AdjacencyMatrix>┘         │
//!                                        ├─ NodeIndex (id -> activity)
//!                                        └─ PrecedenceNetwork (diagnostics)
//! ```
//!
//! Matrix position `i` addresses the activity whose numeric identifier is
//! `i + 1`. Cells that cannot be resolved are skipped; with
//! [`GraphOptions::report_unresolved`] they are listed as warnings.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod builder;
mod index;
mod network;

pub use builder::{CombinedGraph, CompositionFailure, GraphBuilder, GraphOptions, LinkScan};
pub use index::{position_id, NodeIndex};
pub use network::PrecedenceNetwork;
