//! actnet Core
//!
//! Shared vocabulary for the activity network pipeline:
//! - **Model**: `Activity`, `AdjacencyMatrix`, `Link`
//! - **Dates**: calendar-date normalization for the two accepted input shapes
//! - **Headers**: column label normalization used before alias lookup
//! - **Issues**: structured, non-fatal validation records
//! - **Errors**: the fatal taxonomy and its serializable `ErrorReport`
//!
//! # Architecture
//!
//! ```text
//! activity file ──→ ActivityParser ──┐
//!                                    ├──→ GraphBuilder ──→ Link[]
//! matrix file ───→ AdjacencyParser ──┘
//! ```
//!
//! Every stage shares the types defined here; none of them hold state across
//! calls.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod code;
pub mod dates;
pub mod error;
pub mod headers;
pub mod issue;
pub mod model;

pub use code::Code;
pub use dates::{epoch_millis, gap_days, normalize_date, parse_calendar_date, DAY_MS};
pub use error::{DatasetError, DatasetKind, ErrorReport, Operation};
pub use headers::normalize_header;
pub use issue::ValidationIssue;
pub use model::{Activity, AdjacencyMatrix, Link};
