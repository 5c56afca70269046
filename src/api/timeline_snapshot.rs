use serde::{Deserialize, Serialize};

use crate::core::TimePoint;

use super::{SeriesHandle, TimelineConfig, TimelineIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSnapshotPoint {
    pub index: usize,
    pub time: TimePoint,
    pub series_count: usize,
}

/// Serializable deterministic view of the merged timeline used by
/// regression tests and debugging tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub config: TimelineConfig,
    pub points: Vec<TimelineSnapshotPoint>,
}

impl<S: SeriesHandle> TimelineIndex<S> {
    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            config: self.config,
            points: self
                .entries
                .iter()
                .map(|entry| TimelineSnapshotPoint {
                    index: entry.index,
                    time: entry.time_point,
                    series_count: entry.series_values.len(),
                })
                .collect(),
        }
    }
}
