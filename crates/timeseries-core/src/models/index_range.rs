use serde::Serialize;
use std::ops::RangeInclusive;

/// Inclusive, zero-based slice bounds into a dataset's value array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRange {
    start_index: i64,
    end_index: i64,
}

impl IndexRange {
    pub(crate) fn new(start_index: i64, end_index: i64) -> Self {
        debug_assert!(start_index <= end_index);
        Self { start_index, end_index }
    }

    pub fn start_index(&self) -> i64 {
        self.start_index
    }

    pub fn end_index(&self) -> i64 {
        self.end_index
    }

    /// Number of indices covered, both ends included
    pub fn len(&self) -> u64 {
        self.end_index.abs_diff(self.start_index) + 1
    }

    /// A resolved range always covers at least one index
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, index: i64) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    /// Bounds usable for slicing, or `None` when the start lies before index 0.
    ///
    /// Resolution does not reject a start below zero, so callers that slice
    /// must decide how to treat such ranges.
    pub fn as_usize_range(&self) -> Option<RangeInclusive<usize>> {
        let start = usize::try_from(self.start_index).ok()?;
        let end = usize::try_from(self.end_index).ok()?;
        Some(start..=end)
    }
}
