use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{BarValue, SeriesItem, TimePoint};
use crate::error::{ChartError, ChartResult};

mod json_contract;
mod plot_series;
mod series_data_controller;
mod timeline_config;
mod timeline_snapshot;
mod update_packet;

pub use json_contract::{TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineSnapshotJsonContractV1};
pub use plot_series::PlotSeries;
pub use timeline_config::TimelineConfig;
pub use timeline_snapshot::{TimelineSnapshot, TimelineSnapshotPoint};
pub use update_packet::UpdatePacket;

/// Caller-owned series identity.
///
/// The timeline uses it as a map key and reads `last_time_point` only to keep
/// incremental updates on the series' established time representation.
pub trait SeriesHandle: Clone + Eq + Hash + Debug {
    /// Time of the most recent row held by the series' own storage.
    fn last_time_point(&self) -> Option<TimePoint>;
}

/// One series' observation at a time point, as it arrived.
///
/// `time` is the point the series itself normalized, so its representation
/// never borrows from another series sharing the timestamp. `value` is
/// projected once with the caller's allocator and reused on every rebuild.
#[derive(Debug, Clone)]
struct SeriesCell {
    item: SeriesItem,
    time: TimePoint,
    value: BarValue,
}

#[derive(Debug, Clone)]
struct TimePointEntry<S> {
    time_point: TimePoint,
    index: usize,
    series_values: IndexMap<S, SeriesCell>,
}

impl<S: SeriesHandle> TimePointEntry<S> {
    fn new(time_point: TimePoint, index: usize) -> Self {
        Self {
            time_point,
            index,
            series_values: IndexMap::new(),
        }
    }
}

/// Merged, strictly ordered timeline shared by every series of a chart.
///
/// Entries live in an arena sorted by timestamp; `entries[i].index == i` at
/// all times. `position_by_timestamp` maps each timestamp to its arena slot.
#[derive(Debug, Clone)]
pub struct TimelineIndex<S: SeriesHandle> {
    config: TimelineConfig,
    entries: Vec<TimePointEntry<S>>,
    position_by_timestamp: HashMap<i64, usize>,
}

impl<S: SeriesHandle> Default for TimelineIndex<S> {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

impl<S: SeriesHandle> TimelineIndex<S> {
    #[must_use]
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            position_by_timestamp: HashMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> TimelineConfig {
        self.config
    }

    /// Number of distinct time points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn sorted_timestamps(&self) -> Vec<i64> {
        self.entries
            .iter()
            .map(|entry| entry.time_point.timestamp)
            .collect()
    }

    #[must_use]
    pub fn time_point_at(&self, index: usize) -> Option<&TimePoint> {
        self.entries.get(index).map(|entry| &entry.time_point)
    }

    #[must_use]
    pub fn index_of(&self, timestamp: i64) -> Option<usize> {
        self.position_by_timestamp
            .get(&timestamp)
            .and_then(|position| self.entries.get(*position))
            .map(|entry| entry.index)
    }

    #[must_use]
    pub fn series_count_at(&self, index: usize) -> usize {
        self.entries
            .get(index)
            .map_or(0, |entry| entry.series_values.len())
    }

    /// Raw observation `series` supplied at `index`, if any.
    #[must_use]
    pub fn series_item_at(&self, index: usize, series: &S) -> Option<&SeriesItem> {
        self.entries
            .get(index)
            .and_then(|entry| entry.series_values.get(series))
            .map(|cell| &cell.item)
    }

    /// Drops every entry. Called by the owning chart on teardown.
    pub fn reset(&mut self) {
        debug!(cleared_count = self.entries.len(), "reset timeline index");
        self.entries.clear();
        self.position_by_timestamp.clear();
    }

    fn entry_at(&self, index: usize) -> ChartResult<&TimePointEntry<S>> {
        let entry = self.entries.get(index).ok_or_else(|| {
            ChartError::MissingExpectedEntry(format!("no time point at index {index}"))
        })?;
        if entry.index != index {
            return Err(ChartError::MissingExpectedEntry(format!(
                "arena slot {index} carries index {}",
                entry.index
            )));
        }
        Ok(entry)
    }
}
