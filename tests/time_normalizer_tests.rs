use chart_timeline::ChartError;
use chart_timeline::core::{
    BusinessDay, DateParseMode, SeriesItem, TimeInput, TimeKind, TimePoint, normalize_time,
    select_time_converter,
};

#[test]
fn business_day_normalizes_to_utc_midnight() {
    let point = normalize_time(
        &TimeInput::BusinessDay(BusinessDay::new(2021, 1, 1)),
        DateParseMode::Strict,
    )
    .expect("valid day");

    assert_eq!(point.timestamp, 1_609_459_200);
    assert_eq!(point.business_day, Some(BusinessDay::new(2021, 1, 1)));
    assert_eq!(point.kind(), TimeKind::BusinessDay);
}

#[test]
fn timestamp_normalizes_without_business_day() {
    let point = normalize_time(&TimeInput::Timestamp(1_700_000_123), DateParseMode::Strict)
        .expect("timestamp");

    assert_eq!(point.timestamp, 1_700_000_123);
    assert_eq!(point.business_day, None);
    assert_eq!(point.kind(), TimeKind::Timestamp);
}

#[test]
fn date_string_matches_equivalent_business_day() {
    let from_string =
        normalize_time(&TimeInput::from("2020-02-29"), DateParseMode::Strict).expect("leap day");
    let from_day = normalize_time(
        &TimeInput::BusinessDay(BusinessDay::new(2020, 2, 29)),
        DateParseMode::Strict,
    )
    .expect("leap day");

    assert_eq!(from_string, from_day);
    assert_eq!(from_string.business_day, from_day.business_day);
}

#[test]
fn strict_mode_rejects_non_canonical_strings() {
    for text in ["2021-1-01", "21-01-01", "2021/01/01", "2021-01-01 ", "", "abcd-ef-gh"] {
        let err = normalize_time(&TimeInput::from(text), DateParseMode::Strict)
            .expect_err("non-canonical date must fail");
        assert!(
            matches!(err, ChartError::InvalidDateFormat(_)),
            "unexpected error for `{text}`"
        );
    }
}

#[test]
fn impossible_dates_are_rejected_in_every_mode() {
    for mode in [DateParseMode::Strict, DateParseMode::Lenient] {
        let err = normalize_time(&TimeInput::from("2021-02-29"), mode)
            .expect_err("2021 is not a leap year");
        assert!(matches!(err, ChartError::InvalidDateFormat(_)));

        let err = normalize_time(
            &TimeInput::BusinessDay(BusinessDay::new(2021, 4, 31)),
            mode,
        )
        .expect_err("april has 30 days");
        assert!(matches!(err, ChartError::InvalidDateFormat(_)));
    }
}

#[test]
fn lenient_mode_accepts_unpadded_strings() {
    let point = normalize_time(&TimeInput::from("2021-3-7"), DateParseMode::Lenient)
        .expect("lenient date");
    assert_eq!(point.business_day, Some(BusinessDay::new(2021, 3, 7)));
}

#[test]
fn time_points_compare_by_timestamp_only() {
    let day = TimePoint {
        timestamp: 1_609_459_200,
        business_day: Some(BusinessDay::new(2021, 1, 1)),
    };
    let raw = TimePoint::from_timestamp(1_609_459_200);
    let later = TimePoint::from_timestamp(1_609_459_201);

    assert_eq!(day, raw);
    assert!(raw < later);
}

#[test]
fn converter_is_selected_from_first_item() {
    assert!(select_time_converter(&[], DateParseMode::Strict).is_none());

    let daily = [SeriesItem::value("2021-01-01", 1.0), SeriesItem::value(5_i64, 2.0)];
    let converter = select_time_converter(&daily, DateParseMode::Strict).expect("converter");
    assert_eq!(converter.kind(), TimeKind::BusinessDay);
    assert!(converter.convert(daily[0].time()).is_ok());
    assert!(matches!(
        converter.convert(daily[1].time()),
        Err(ChartError::TimeRepresentationMismatch { .. })
    ));

    let intraday = [SeriesItem::ohlc(1_000_i64, 1.0, 2.0, 0.5, 1.5)];
    let converter = select_time_converter(&intraday, DateParseMode::Strict).expect("converter");
    assert_eq!(converter.kind(), TimeKind::Timestamp);
}

#[test]
fn time_input_deserializes_from_each_shape() {
    let day: TimeInput =
        serde_json::from_str(r#"{"year":2021,"month":1,"day":2}"#).expect("business day json");
    let stamp: TimeInput = serde_json::from_str("1609459200").expect("timestamp json");
    let text: TimeInput = serde_json::from_str(r#""2021-01-02""#).expect("string json");

    assert_eq!(day, TimeInput::BusinessDay(BusinessDay::new(2021, 1, 2)));
    assert_eq!(stamp, TimeInput::Timestamp(1_609_459_200));
    assert_eq!(text, TimeInput::DateString("2021-01-02".to_owned()));
}
