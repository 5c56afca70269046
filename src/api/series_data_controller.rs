use tracing::{debug, trace, warn};

use crate::core::{
    ColorAllocator, SeriesItem, SeriesRow, SeriesUpdate, TickMark, TimePoint, normalize_time,
    project_bar_value, select_time_converter, tick_mark_span,
};
use crate::error::{ChartError, ChartResult};

use super::{SeriesCell, SeriesHandle, TimePointEntry, TimelineIndex, UpdatePacket};

impl<S: SeriesHandle> TimelineIndex<S> {
    /// Replaces every observation of `series` and rebuilds the whole timeline.
    ///
    /// All times are converted before any state changes, so a rejected batch
    /// leaves the index untouched. The returned packet is a full rebuild: it
    /// carries every series that still has data (and `series` itself, with an
    /// empty update if it no longer has any), every tick mark and every time
    /// point as a change.
    ///
    /// `colors` resolves per-point colors of `series` only; rows of other
    /// series are re-sent with the color ids they were given on arrival.
    pub fn replace_series(
        &mut self,
        series: &S,
        items: Vec<SeriesItem>,
        mut colors: Option<&mut dyn ColorAllocator>,
    ) -> ChartResult<UpdatePacket<S>> {
        let incoming_count = items.len();
        let converted = self.convert_batch(items)?;

        for entry in &mut self.entries {
            entry.series_values.shift_remove(series);
        }

        for (time_point, item) in converted {
            let cell = SeriesCell {
                value: project_bar_value(&item, colors.as_deref_mut()),
                time: time_point,
                item,
            };
            if let Some(&position) = self.position_by_timestamp.get(&time_point.timestamp) {
                let entry = self.entries.get_mut(position).ok_or_else(|| {
                    ChartError::MissingExpectedEntry(format!(
                        "timestamp {} points past the arena end",
                        time_point.timestamp
                    ))
                })?;
                entry.series_values.insert(series.clone(), cell);
            } else {
                let position = self.entries.len();
                let mut entry = TimePointEntry::new(time_point, position);
                entry.series_values.insert(series.clone(), cell);
                self.entries.push(entry);
                self.position_by_timestamp
                    .insert(time_point.timestamp, position);
            }
        }

        let before_prune = self.entries.len();
        self.entries.retain(|entry| !entry.series_values.is_empty());
        let pruned_count = before_prune - self.entries.len();
        self.entries.sort_by_key(|entry| entry.time_point.timestamp);
        self.rebuild_positions();

        let mut packet = UpdatePacket::new(0, true);
        self.fill_range(0, &mut packet)?;
        if !packet.series_updates.contains_key(series) {
            packet
                .series_updates
                .insert(series.clone(), SeriesUpdate::default());
        }

        debug!(
            ?series,
            incoming_count,
            pruned_count,
            time_points = self.entries.len(),
            series_in_packet = packet.series_updates.len(),
            "replace series data"
        );
        Ok(packet)
    }

    /// Appends or amends a single observation of `series`.
    ///
    /// - amend: the timestamp already exists; only this series' row changes
    ///   and no index moves.
    /// - append: the timestamp is past the last one; it takes the next index.
    /// - insert: the timestamp lands mid-timeline; every later index shifts up
    ///   by one and every series is re-sent from the insertion point on.
    pub fn update_series(
        &mut self,
        series: &S,
        item: SeriesItem,
        colors: Option<&mut dyn ColorAllocator>,
    ) -> ChartResult<UpdatePacket<S>> {
        if let Some(last) = series.last_time_point() {
            let expected = last.kind();
            let found = item.time_kind();
            if expected != found {
                warn!(
                    ?series,
                    %expected,
                    %found,
                    "rejecting update with mismatched time representation"
                );
                return Err(ChartError::TimeRepresentationMismatch { expected, found });
            }
        }

        let time_point = normalize_time(item.time(), self.config.date_parse_mode)?;
        let cell = SeriesCell {
            value: project_bar_value(&item, colors),
            time: time_point,
            item,
        };

        if let Some(&position) = self.position_by_timestamp.get(&time_point.timestamp) {
            return self.amend_point(series, position, cell);
        }

        let is_append = self
            .entries
            .last()
            .is_none_or(|last| last.time_point.timestamp <= time_point.timestamp);
        if is_append {
            Ok(self.append_point(series, cell))
        } else {
            self.insert_point(series, cell)
        }
    }

    /// Drops every observation of `series`; equivalent to replacing it with
    /// an empty batch.
    pub fn remove_series(&mut self, series: &S) -> ChartResult<UpdatePacket<S>> {
        self.replace_series(series, Vec::new(), None)
    }

    fn convert_batch(&self, items: Vec<SeriesItem>) -> ChartResult<Vec<(TimePoint, SeriesItem)>> {
        let Some(converter) = select_time_converter(&items, self.config.date_parse_mode) else {
            return Ok(Vec::new());
        };
        items
            .into_iter()
            .map(|item| Ok((converter.convert(item.time())?, item)))
            .collect()
    }

    fn amend_point(
        &mut self,
        series: &S,
        position: usize,
        cell: SeriesCell,
    ) -> ChartResult<UpdatePacket<S>> {
        let entry = self.entries.get_mut(position).ok_or_else(|| {
            ChartError::MissingExpectedEntry(format!("no arena slot {position} to amend"))
        })?;
        let index = entry.index;
        let row = SeriesRow {
            index,
            time: cell.time,
            value: cell.value,
        };
        entry.series_values.insert(series.clone(), cell);

        let mut packet = UpdatePacket::new(index, false);
        packet.push_row(series.clone(), row);

        trace!(?series, index, timestamp = row.time.timestamp, "amend series point");
        Ok(packet)
    }

    fn append_point(&mut self, series: &S, cell: SeriesCell) -> UpdatePacket<S> {
        let index = self.entries.len();
        let previous = self.entries.last().map(|entry| entry.time_point);
        let time_point = cell.time;
        let row = SeriesRow {
            index,
            time: time_point,
            value: cell.value,
        };

        let mut entry = TimePointEntry::new(time_point, index);
        entry.series_values.insert(series.clone(), cell);
        self.entries.push(entry);
        self.position_by_timestamp
            .insert(time_point.timestamp, index);

        let mut packet = UpdatePacket::new(index, false);
        packet.push_row(series.clone(), row);
        packet.changes.push(time_point);
        packet.marks.push(TickMark {
            span: tick_mark_span(&time_point, previous.as_ref()),
            time: time_point,
            index,
        });

        trace!(
            ?series,
            index,
            timestamp = time_point.timestamp,
            "append series point"
        );
        packet
    }

    fn insert_point(&mut self, series: &S, cell: SeriesCell) -> ChartResult<UpdatePacket<S>> {
        let time_point = cell.time;
        let position = self
            .entries
            .partition_point(|entry| entry.time_point.timestamp < time_point.timestamp);

        self.increment_indices_from(position)?;

        let mut entry = TimePointEntry::new(time_point, position);
        entry.series_values.insert(series.clone(), cell);
        self.entries.insert(position, entry);
        self.position_by_timestamp
            .insert(time_point.timestamp, position);

        let mut packet = UpdatePacket::new(position, false);
        self.fill_range(position, &mut packet)?;

        trace!(
            ?series,
            index = position,
            timestamp = time_point.timestamp,
            shifted_count = self.entries.len() - position - 1,
            series_in_packet = packet.series_updates.len(),
            "insert series point mid-timeline"
        );
        Ok(packet)
    }

    /// Shifts every entry at or after `from` one index up, highest first so no
    /// two entries ever share an index.
    fn increment_indices_from(&mut self, from: usize) -> ChartResult<()> {
        for index in (from..self.entries.len()).rev() {
            let entry = self.entries.get_mut(index).ok_or_else(|| {
                ChartError::MissingExpectedEntry(format!("no time point at index {index}"))
            })?;
            let shifted = entry.index + 1;
            entry.index = shifted;
            self.position_by_timestamp
                .insert(entry.time_point.timestamp, shifted);
        }
        Ok(())
    }

    fn rebuild_positions(&mut self) {
        self.position_by_timestamp.clear();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.index = index;
            self.position_by_timestamp
                .insert(entry.time_point.timestamp, index);
        }
    }

    /// Emits marks, changes and every series' stored rows for indices
    /// `from..len`. Rows reuse the values projected on arrival, so a rebuild
    /// never re-resolves another series' colors.
    fn fill_range(&self, from: usize, packet: &mut UpdatePacket<S>) -> ChartResult<()> {
        for index in from..self.entries.len() {
            let entry = self.entry_at(index)?;
            let previous = match index.checked_sub(1) {
                Some(previous_index) => Some(&self.entry_at(previous_index)?.time_point),
                None => None,
            };
            let time = entry.time_point;

            packet.marks.push(TickMark {
                span: tick_mark_span(&time, previous),
                time,
                index,
            });
            packet.changes.push(time);
            for (series, cell) in &entry.series_values {
                packet.push_row(
                    series.clone(),
                    SeriesRow {
                        index,
                        time: cell.time,
                        value: cell.value,
                    },
                );
            }
        }
        Ok(())
    }
}
