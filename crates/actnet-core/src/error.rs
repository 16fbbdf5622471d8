//! Error types for activity network operations
//!
//! Provides the fatal side of the taxonomy:
//! - **not-found**: a source file is absent
//! - **empty**: a source parsed to zero rows
//! - **validation**: row or cell issues, always reported exhaustively
//! - **structural**: one or both files missing for the combined operation
//!
//! Every error renders to an `ErrorReport`, the wire shape shared by all
//! transports.

use crate::code::Code;
use crate::issue::ValidationIssue;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// The two source datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Activity properties (headed table)
    Activities,
    /// Precedence matrix (headerless grid)
    Adjacency,
}

impl DatasetKind {
    /// Code reported when this dataset's file is absent
    #[must_use]
    pub const fn not_found_code(self) -> Code {
        match self {
            Self::Activities => Code::ActivityFileNotFound,
            Self::Adjacency => Code::AdjacencyFileNotFound,
        }
    }

    /// Code reported when this dataset's file has no rows
    #[must_use]
    pub const fn empty_code(self) -> Code {
        match self {
            Self::Activities => Code::ActivityEmpty,
            Self::Adjacency => Code::AdjacencyEmpty,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activities => f.write_str("activity properties"),
            Self::Adjacency => f.write_str("adjacency matrix"),
        }
    }
}

/// The three logical operations exposed to transports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GetActivities`
    Activities,
    /// `GetAdjacency`
    Adjacency,
    /// `GetCombinedGraph`
    CombinedGraph,
}

impl Operation {
    /// Top-level code for a validation failure of this operation
    #[must_use]
    pub const fn validation_code(self) -> Code {
        match self {
            Self::Activities => Code::ActivityValidation,
            Self::Adjacency => Code::InvalidCellValue,
            Self::CombinedGraph => Code::CombinedValidation,
        }
    }

    const fn validation_message(self) -> &'static str {
        match self {
            Self::Activities => "Activity properties validation failed",
            Self::Adjacency => "Adjacency matrix has invalid cells",
            Self::CombinedGraph => "Validation issues found while building links",
        }
    }
}

/// Fatal outcome of an operation
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Source file absent
    #[error("{} not found", file_label(.path))]
    NotFound {
        /// Dataset whose file is absent
        dataset: DatasetKind,
        /// Where the file was looked for
        path: PathBuf,
    },

    /// Source file parsed to zero rows
    #[error("{} is empty", file_label(.path))]
    Empty {
        /// Dataset that produced no rows
        dataset: DatasetKind,
        /// File that was read
        path: PathBuf,
    },

    /// One or both files absent for the combined operation
    #[error("Required CSV file(s) missing")]
    FilesMissing {
        /// Each absent dataset with its path, activities first
        missing: Vec<(DatasetKind, PathBuf)>,
    },

    /// Combined operation found no activity records
    #[error("No activities parsed from {}", file_label(.path))]
    NoActivities {
        /// Activity file that was read
        path: PathBuf,
    },

    /// Combined operation found no matrix rows
    #[error("No rows parsed from {}", file_label(.path))]
    NoAdjacencyRows {
        /// Matrix file that was read
        path: PathBuf,
    },

    /// Row or cell issues were collected
    #[error("{}", .operation.validation_message())]
    Invalid {
        /// Operation that collected the issues; picks the top-level code
        operation: Operation,
        /// Every issue, in discovery order
        issues: Vec<ValidationIssue>,
    },

    /// Source exists but could not be read or decoded
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create validation failure for an operation
    #[must_use]
    pub fn invalid(operation: Operation, issues: Vec<ValidationIssue>) -> Self {
        Self::Invalid { operation, issues }
    }

    /// Stable top-level code
    #[must_use]
    pub fn code(&self) -> Code {
        match self {
            Self::NotFound { dataset, .. } => dataset.not_found_code(),
            Self::Empty { dataset, .. } => dataset.empty_code(),
            Self::FilesMissing { .. } => Code::FilesMissing,
            Self::NoActivities { .. } => Code::NoActivities,
            Self::NoAdjacencyRows { .. } => Code::NoAdjacencyRows,
            Self::Invalid { operation, .. } => operation.validation_code(),
            Self::Io { .. } => Code::Io,
        }
    }

    /// HTTP status for transports that need one
    #[inline]
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.code().http_status()
    }

    /// Itemized details for the report
    #[must_use]
    pub fn details(&self) -> Vec<ValidationIssue> {
        match self {
            Self::Invalid { issues, .. } => issues.clone(),
            Self::FilesMissing { missing } => missing
                .iter()
                .map(|(dataset, path)| {
                    ValidationIssue::new(
                        dataset.not_found_code(),
                        format!("{} not found", file_label(path)),
                    )
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Render the wire report
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        ErrorReport::new(self.code(), self.to_string(), self.details())
    }
}

/// Structured failure body shared by every transport.
///
/// `{"status": "error", "code": ..., "message": ..., "details": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// Always `"error"`
    pub status: &'static str,
    /// Stable machine-readable code
    pub code: Code,
    /// Human-readable summary
    pub message: String,
    /// Itemized issues, possibly empty
    pub details: Vec<ValidationIssue>,
}

impl ErrorReport {
    /// Create a report
    #[must_use]
    pub fn new(code: Code, message: impl Into<String>, details: Vec<ValidationIssue>) -> Self {
        Self {
            status: "error",
            code,
            message: message.into(),
            details,
        }
    }

    /// HTTP status for the report's code
    #[inline]
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
