use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::{SeriesRow, SeriesUpdate, TickMark, TimePoint, UpdateScope};

/// Incremental description of one timeline mutation.
///
/// `series_updates` feeds per-series bar storage; `changes`, `marks` and
/// `index` feed the time-axis. When `full_rebuild` is set every index may
/// have moved and consumers must replace, not merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatePacket<S: Eq + Hash> {
    pub series_updates: IndexMap<S, SeriesUpdate>,
    pub changes: Vec<TimePoint>,
    pub index: usize,
    pub marks: Vec<TickMark>,
    pub full_rebuild: bool,
}

impl<S: Eq + Hash> UpdatePacket<S> {
    pub(super) fn new(index: usize, full_rebuild: bool) -> Self {
        Self {
            series_updates: IndexMap::new(),
            changes: Vec::new(),
            index,
            marks: Vec::new(),
            full_rebuild,
        }
    }

    pub(super) fn push_row(&mut self, series: S, row: SeriesRow) {
        self.series_updates
            .entry(series)
            .or_default()
            .update
            .push(row);
    }

    /// Which stored rows this packet supersedes in per-series storage.
    #[must_use]
    pub fn scope(&self) -> UpdateScope {
        if self.full_rebuild {
            UpdateScope::Full
        } else if self.changes.is_empty() {
            UpdateScope::Rows
        } else {
            UpdateScope::From(self.index)
        }
    }

    #[must_use]
    pub fn series_update(&self, series: &S) -> Option<&SeriesUpdate> {
        self.series_updates.get(series)
    }

    /// Indices touched for `series`, in packet order.
    #[must_use]
    pub fn updated_indices(&self, series: &S) -> Vec<usize> {
        self.series_updates
            .get(series)
            .map(|update| update.update.iter().map(|row| row.index).collect())
            .unwrap_or_default()
    }
}
