//! Activity lookup by numeric identifier
//!
//! Matrix row/column `i` refers to the activity whose identifier is `i + 1`.
//! The table is built once per request, before any cell is scanned, so the
//! activities it cannot address are known up front.

use actnet_core::Activity;
use std::collections::HashMap;

/// Identifier table over a parsed activity list
#[derive(Debug, Clone, Default)]
pub struct NodeIndex<'a> {
    by_id: HashMap<i64, &'a Activity>,
    non_numeric: Vec<&'a Activity>,
    shadowed: Vec<(i64, &'a Activity, &'a Activity)>,
}

impl<'a> NodeIndex<'a> {
    /// Index activities by numeric identifier.
    ///
    /// When two activities coerce to the same number the later one wins and
    /// the earlier one is recorded as shadowed.
    #[must_use]
    pub fn build(activities: &'a [Activity]) -> Self {
        let mut index = Self::default();
        for activity in activities {
            match activity.numeric_id() {
                Some(id) => {
                    if let Some(previous) = index.by_id.insert(id, activity) {
                        index.shadowed.push((id, previous, activity));
                    }
                }
                None => index.non_numeric.push(activity),
            }
        }
        index
    }

    /// Activity with the given identifier
    #[inline]
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&'a Activity> {
        self.by_id.get(&id).copied()
    }

    /// Activity addressed by a zero-based matrix position
    #[must_use]
    pub fn at_position(&self, position: usize) -> Option<&'a Activity> {
        position_id(position).and_then(|id| self.get(id))
    }

    /// Activities whose identifier is not a whole number
    #[inline]
    #[must_use]
    pub fn non_numeric(&self) -> &[&'a Activity] {
        &self.non_numeric
    }

    /// `(id, shadowed, winner)` for each activity replaced by a later one
    #[inline]
    #[must_use]
    pub fn shadowed(&self) -> &[(i64, &'a Activity, &'a Activity)] {
        &self.shadowed
    }

    /// Number of addressable activities
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True when no activity is addressable
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Identifier addressed by a zero-based matrix position
#[inline]
#[must_use]
pub fn position_id(position: usize) -> Option<i64> {
    i64::try_from(position).ok()?.checked_add(1)
}
