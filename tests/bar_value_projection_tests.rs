use approx::assert_relative_eq;
use rust_decimal::Decimal;

use chart_timeline::core::{
    BarValue, ColorAllocator, ColorId, DEFAULT_COLOR_ID, Palette, SeriesItem, TimeInput,
    project_bar_value,
};

/// Allocator that records every lookup so tests can see when it is consulted.
#[derive(Default)]
struct RecordingAllocator {
    requested: Vec<String>,
}

impl ColorAllocator for RecordingAllocator {
    fn add_color(&mut self, color: &str) -> ColorId {
        self.requested.push(color.to_owned());
        42
    }
}

#[test]
fn value_item_fills_all_price_slots() {
    let value = project_bar_value(&SeriesItem::value(10_i64, 12.5), None);

    assert_eq!(value, BarValue::flat(12.5, DEFAULT_COLOR_ID));
    assert_eq!(value.as_tuple(), (12.5, 12.5, 12.5, 12.5, 0));
}

#[test]
fn value_item_color_goes_through_allocator() {
    let mut allocator = RecordingAllocator::default();
    let item = SeriesItem::colored_value(10_i64, 3.0, "rgba(0, 0, 0, 0.5)");

    let value = project_bar_value(&item, Some(&mut allocator));

    assert_eq!(value.color, 42);
    assert_eq!(allocator.requested, vec!["rgba(0, 0, 0, 0.5)".to_owned()]);
}

#[test]
fn value_item_color_without_allocator_keeps_default() {
    let item = SeriesItem::colored_value(10_i64, 3.0, "#123456");
    assert_eq!(project_bar_value(&item, None).color, DEFAULT_COLOR_ID);
}

#[test]
fn uncolored_value_item_never_touches_allocator() {
    let mut allocator = RecordingAllocator::default();
    let value = project_bar_value(&SeriesItem::value(10_i64, 3.0), Some(&mut allocator));

    assert_eq!(value.color, DEFAULT_COLOR_ID);
    assert!(allocator.requested.is_empty());
}

#[test]
fn ohlc_item_maps_fields_and_ignores_allocator() {
    let mut palette = Palette::new();
    let item = SeriesItem::ohlc(10_i64, 100.0, 120.0, 90.0, 110.0);

    let value = project_bar_value(&item, Some(&mut palette));

    assert_eq!(value.as_tuple(), (100.0, 120.0, 90.0, 110.0, DEFAULT_COLOR_ID));
    assert!(palette.is_empty());
}

#[test]
fn decimal_constructors_convert_to_f64() {
    let line = SeriesItem::value_from_decimal(10_i64, Decimal::new(12345, 2)).expect("value");
    let bar = SeriesItem::ohlc_from_decimal(
        "2021-01-04",
        Decimal::new(1000, 1),
        Decimal::new(1200, 1),
        Decimal::new(900, 1),
        Decimal::new(1100, 1),
    )
    .expect("ohlc");

    assert_relative_eq!(project_bar_value(&line, None).close, 123.45, epsilon = 1e-9);
    let value = project_bar_value(&bar, None);
    assert_relative_eq!(value.open, 100.0, epsilon = 1e-9);
    assert_relative_eq!(value.high, 120.0, epsilon = 1e-9);
    assert_relative_eq!(value.low, 90.0, epsilon = 1e-9);
    assert_relative_eq!(value.close, 110.0, epsilon = 1e-9);
    assert_eq!(bar.time(), &TimeInput::from("2021-01-04"));
}

#[test]
fn series_items_deserialize_into_matching_variant() {
    let items: Vec<SeriesItem> = serde_json::from_str(
        r#"[
            {"time": "2021-01-04", "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5},
            {"time": 1609459200, "value": 7.0},
            {"time": {"year": 2021, "month": 1, "day": 5}, "value": 8.0, "color": "red"}
        ]"#,
    )
    .expect("series json");

    assert!(matches!(items[0], SeriesItem::Ohlc(_)));
    assert!(matches!(items[1], SeriesItem::Value(_)));
    assert_eq!(
        items[2],
        SeriesItem::colored_value(
            chart_timeline::core::BusinessDay::new(2021, 1, 5),
            8.0,
            "red"
        )
    );
}
