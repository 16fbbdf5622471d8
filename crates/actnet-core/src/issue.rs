//! Structured validation issues

use crate::code::Code;
use serde::Serialize;
use serde_json::Value;

/// A non-fatal data defect found while parsing or building.
///
/// Issues are accumulated and reported together; producing one never stops
/// the pass that found it. `meta` carries positional and value context
/// (row, column, offending value) and is omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Stable machine-readable code
    pub code: Code,
    /// Human-readable description
    pub message: String,
    /// Location and value context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ValidationIssue {
    /// Create an issue without metadata
    #[inline]
    #[must_use]
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            meta: None,
        }
    }

    /// Attach metadata
    #[inline]
    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Look up a metadata field
    #[must_use]
    pub fn meta_field(&self, key: &str) -> Option<&Value> {
        self.meta.as_ref().and_then(|m| m.get(key))
    }
}
