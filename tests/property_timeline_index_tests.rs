use std::collections::{BTreeMap, BTreeSet};

use chart_timeline::api::{PlotSeries, TimelineIndex};
use chart_timeline::core::SeriesItem;
use proptest::prelude::*;

const SERIES_COUNT: u64 = 3;

#[derive(Debug, Clone)]
enum Op {
    Replace(u64, Vec<(i64, f64)>),
    Update(u64, i64, f64),
    Remove(u64),
}

fn timestamp_strategy() -> impl Strategy<Value = i64> {
    (0_i64..40).prop_map(|slot| 1_600_000_000 + slot * 900)
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => (
            0..SERIES_COUNT,
            prop::collection::vec((timestamp_strategy(), -100.0f64..100.0), 0..24)
        )
            .prop_map(|(series, points)| Op::Replace(series, points)),
        3 => (0..SERIES_COUNT, timestamp_strategy(), -100.0f64..100.0)
            .prop_map(|(series, time, value)| Op::Update(series, time, value)),
        1 => (0..SERIES_COUNT).prop_map(Op::Remove),
    ]
}

fn items(points: &[(i64, f64)]) -> Vec<SeriesItem> {
    points
        .iter()
        .map(|(time, value)| SeriesItem::value(*time, *value))
        .collect()
}

proptest! {
    #[test]
    fn timeline_stays_sorted_dense_and_in_sync_with_plot_storage(
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let series: Vec<PlotSeries> = (0..SERIES_COUNT).map(PlotSeries::new).collect();
        let mut model: Vec<BTreeMap<i64, f64>> = vec![BTreeMap::new(); series.len()];
        let mut timeline = TimelineIndex::default();

        for op in ops {
            let packet = match op {
                Op::Replace(id, points) => {
                    let slot = id as usize;
                    model[slot] = points.iter().copied().collect();
                    timeline.replace_series(&series[slot], items(&points), None)
                }
                Op::Update(id, time, value) => {
                    let slot = id as usize;
                    model[slot].insert(time, value);
                    timeline.update_series(&series[slot], SeriesItem::value(time, value), None)
                }
                Op::Remove(id) => {
                    let slot = id as usize;
                    model[slot].clear();
                    timeline.remove_series(&series[slot])
                }
            }
            .expect("timestamp-only operations never fail");

            for handle in &series {
                handle.apply_packet(&packet);
            }

            let expected: BTreeSet<i64> = model
                .iter()
                .flat_map(|points| points.keys().copied())
                .collect();
            let timestamps = timeline.sorted_timestamps();
            prop_assert_eq!(
                timestamps.clone(),
                expected.into_iter().collect::<Vec<_>>()
            );

            for (index, timestamp) in timestamps.iter().enumerate() {
                prop_assert_eq!(timeline.index_of(*timestamp), Some(index));
                let point = timeline.time_point_at(index).expect("dense index");
                prop_assert_eq!(point.timestamp, *timestamp);
            }
            prop_assert!(timeline.time_point_at(timestamps.len()).is_none());

            for (slot, handle) in series.iter().enumerate() {
                let bars = handle.bars();
                let stored: Vec<(usize, i64, f64)> = bars
                    .rows()
                    .iter()
                    .map(|row| (row.index, row.time.timestamp, row.value.close))
                    .collect();
                let wanted: Vec<(usize, i64, f64)> = model[slot]
                    .iter()
                    .map(|(time, value)| {
                        (timeline.index_of(*time).expect("indexed"), *time, *value)
                    })
                    .collect();
                prop_assert_eq!(stored, wanted);
            }
        }
    }

    #[test]
    fn replace_is_idempotent(
        other in prop::collection::vec((timestamp_strategy(), -10.0f64..10.0), 0..16),
        data in prop::collection::vec((timestamp_strategy(), -10.0f64..10.0), 0..16),
    ) {
        let background = PlotSeries::new(0);
        let target = PlotSeries::new(1);
        let mut timeline = TimelineIndex::default();
        timeline
            .replace_series(&background, items(&other), None)
            .expect("background series");

        let once = timeline
            .replace_series(&target, items(&data), None)
            .expect("first replace");
        let snapshot = timeline.snapshot();
        let twice = timeline
            .replace_series(&target, items(&data), None)
            .expect("second replace");

        prop_assert_eq!(once, twice);
        prop_assert_eq!(snapshot, timeline.snapshot());
    }
}
