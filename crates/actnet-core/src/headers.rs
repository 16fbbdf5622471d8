//! Column label normalization

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static separator pattern"));

/// Normalize a header label to `lower_snake_case`.
///
/// The label is lower-cased and trimmed, then every run of characters outside
/// `[a-z0-9]` collapses to a single `_`. `"Node ID"` and `"node-id"` both
/// become `"node_id"`; `"NodeId"` becomes `"nodeid"`.
#[must_use]
pub fn normalize_header(label: &str) -> String {
    let lowered = label.to_lowercase();
    SEPARATOR_RUN.replace_all(lowered.trim(), "_").into_owned()
}
