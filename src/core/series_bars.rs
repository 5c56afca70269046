use serde::{Deserialize, Serialize};

use crate::core::bar_value::BarValue;
use crate::core::types::TimePoint;

/// One projected row addressed by its stable timeline index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub index: usize,
    pub time: TimePoint,
    pub value: BarValue,
}

/// Rows for one series, ordered by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesUpdate {
    pub update: Vec<SeriesRow>,
}

/// How much of a series' stored rows an update supersedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateScope {
    /// Every row; the whole timeline was re-indexed.
    Full,
    /// Rows at or after the index; later indices shifted.
    From(usize),
    /// Only the rows carried by the update; nothing moved.
    Rows,
}

/// Per-series bar storage kept in sync from update packets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesBars {
    rows: Vec<SeriesRow>,
}

impl SeriesBars {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn row_at(&self, index: usize) -> Option<&SeriesRow> {
        self.rows
            .binary_search_by_key(&index, |row| row.index)
            .ok()
            .map(|position| &self.rows[position])
    }

    #[must_use]
    pub fn last_time_point(&self) -> Option<TimePoint> {
        self.rows.last().map(|row| row.time)
    }

    /// Applies one series' slice of a packet.
    pub fn apply_update(&mut self, update: &SeriesUpdate, scope: UpdateScope) {
        match scope {
            UpdateScope::Full => {
                self.rows.clone_from(&update.update);
                return;
            }
            UpdateScope::From(index) => {
                let keep = self.rows.partition_point(|row| row.index < index);
                self.rows.truncate(keep);
            }
            UpdateScope::Rows => {}
        }

        for row in &update.update {
            match self
                .rows
                .binary_search_by_key(&row.index, |existing| existing.index)
            {
                Ok(position) => self.rows[position] = *row,
                Err(position) => self.rows.insert(position, *row),
            }
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
