//! Stable machine-readable codes
//!
//! Codes are grouped by prefix: `AP_` for the activity properties dataset,
//! `AM_` for the adjacency matrix and `PM_` for the combined project model.
//! The string forms are part of the wire contract and must never change.

use serde::{Serialize, Serializer};
use std::fmt;

/// Every code that can appear in a report, either at the top level or as an
/// itemized detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Code {
    /// Activity file absent
    ActivityFileNotFound,
    /// Activity file has no data rows
    ActivityEmpty,
    /// Activity file has row-level issues
    ActivityValidation,
    /// Row has an empty identifier
    NodeIdMissing,
    /// Row repeats an identifier seen earlier in the same file
    DuplicateNodeId,
    /// Start date is missing or malformed
    InvalidStartDate,
    /// End date is missing or malformed
    InvalidEndDate,

    /// Adjacency file absent
    AdjacencyFileNotFound,
    /// Adjacency file has no rows
    AdjacencyEmpty,
    /// Matrix cell is not `0` or `1`
    InvalidCellValue,

    /// One or both source files absent for the combined operation
    FilesMissing,
    /// Combined operation parsed no activities
    NoActivities,
    /// Combined operation parsed no matrix rows
    NoAdjacencyRows,
    /// Combined operation collected issues from either dataset
    CombinedValidation,
    /// Matrix references an id with no activity
    UnresolvedReference,
    /// Activity id cannot be coerced to a number
    NonNumericNodeId,
    /// Activity id coerces to the same number as a later activity's
    ShadowedNodeId,
    /// Resolved link skipped because an endpoint has no usable date
    UndatedLink,
    /// Links whose successor ends before the predecessor starts
    BackwardLinks,
    /// Precedence cycle among emitted links
    Cycle,
    /// Node/edge counts with entry and exit nodes
    NetworkSummary,

    /// Source exists but could not be read
    Io,
    /// Route does not exist
    NotFound,
    /// Origin rejected by CORS policy
    Forbidden,
    /// Failure with no more specific code
    Internal,
}

impl Code {
    /// Wire representation of the code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActivityFileNotFound => "AP_FILE_NOT_FOUND",
            Self::ActivityEmpty => "AP_EMPTY",
            Self::ActivityValidation => "AP_VALIDATION_ERROR",
            Self::NodeIdMissing => "AP_NODE_ID_MISSING",
            Self::DuplicateNodeId => "AP_DUPLICATE_NODE_ID",
            Self::InvalidStartDate => "AP_INVALID_START_DATE",
            Self::InvalidEndDate => "AP_INVALID_END_DATE",
            Self::AdjacencyFileNotFound => "AM_FILE_NOT_FOUND",
            Self::AdjacencyEmpty => "AM_EMPTY",
            Self::InvalidCellValue => "AM_INVALID_CELL_VALUE",
            Self::FilesMissing => "PM_FILES_MISSING",
            Self::NoActivities => "PM_NO_ACTIVITIES",
            Self::NoAdjacencyRows => "PM_NO_ADJACENCY_ROWS",
            Self::CombinedValidation => "PM_VALIDATION_ERROR",
            Self::UnresolvedReference => "PM_UNRESOLVED_REFERENCE",
            Self::NonNumericNodeId => "PM_NON_NUMERIC_NODE_ID",
            Self::ShadowedNodeId => "PM_SHADOWED_NODE_ID",
            Self::UndatedLink => "PM_UNDATED_LINK",
            Self::BackwardLinks => "PM_BACKWARD_LINKS",
            Self::Cycle => "PM_CYCLE",
            Self::NetworkSummary => "PM_NETWORK_SUMMARY",
            Self::Io => "IO_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal => "INTERNAL_ERROR",
        }
    }

    /// HTTP status used when this code heads an error report
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ActivityFileNotFound
            | Self::AdjacencyFileNotFound
            | Self::FilesMissing
            | Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::Io | Self::Internal => 500,
            _ => 422,
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
