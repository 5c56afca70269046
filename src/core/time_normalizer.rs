use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::bar_value::SeriesItem;
use crate::core::types::{BusinessDay, TimeInput, TimeKind, TimePoint};
use crate::error::{ChartError, ChartResult};

/// How date strings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateParseMode {
    /// Exactly `YYYY-MM-DD`: four, two and two ASCII digits.
    #[default]
    Strict,
    /// Anything chrono's `%Y-%m-%d` accepts, e.g. `2021-1-5`.
    Lenient,
}

/// Converts a raw time value into its canonical UTC point.
pub fn normalize_time(time: &TimeInput, mode: DateParseMode) -> ChartResult<TimePoint> {
    match time {
        TimeInput::BusinessDay(day) => business_day_to_time_point(*day),
        TimeInput::Timestamp(timestamp) => Ok(TimePoint::from_timestamp(*timestamp)),
        TimeInput::DateString(text) => business_day_to_time_point(parse_date_string(text, mode)?),
    }
}

pub fn business_day_to_time_point(day: BusinessDay) -> ChartResult<TimePoint> {
    let date = NaiveDate::from_ymd_opt(day.year, day.month, day.day).ok_or_else(|| {
        ChartError::InvalidDateFormat(format!(
            "{:04}-{:02}-{:02} is not a calendar date",
            day.year, day.month, day.day
        ))
    })?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
        ChartError::InvalidDateFormat(format!("{date} has no utc midnight"))
    })?;

    Ok(TimePoint {
        timestamp: midnight.and_utc().timestamp(),
        business_day: Some(day),
    })
}

pub fn parse_date_string(text: &str, mode: DateParseMode) -> ChartResult<BusinessDay> {
    if mode == DateParseMode::Strict && !is_strict_date_pattern(text) {
        return Err(ChartError::InvalidDateFormat(format!(
            "`{text}` does not match YYYY-MM-DD"
        )));
    }

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|err| {
        ChartError::InvalidDateFormat(format!("`{text}` is not a calendar date: {err}"))
    })?;

    Ok(BusinessDay::from(date))
}

fn is_strict_date_pattern(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(position, byte)| match position {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl From<NaiveDate> for BusinessDay {
    fn from(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }
}

/// Per-batch time conversion, chosen from the first item's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeConverter {
    kind: TimeKind,
    date_parse_mode: DateParseMode,
}

impl TimeConverter {
    #[must_use]
    pub fn new(kind: TimeKind, date_parse_mode: DateParseMode) -> Self {
        Self {
            kind,
            date_parse_mode,
        }
    }

    #[must_use]
    pub fn kind(self) -> TimeKind {
        self.kind
    }

    /// Converts one batch member; members of the other representation are
    /// rejected rather than tagged with this batch's kind.
    pub fn convert(self, time: &TimeInput) -> ChartResult<TimePoint> {
        let found = time.kind();
        if found != self.kind {
            return Err(ChartError::TimeRepresentationMismatch {
                expected: self.kind,
                found,
            });
        }
        normalize_time(time, self.date_parse_mode)
    }
}

/// Returns `None` for an empty batch.
#[must_use]
pub fn select_time_converter(
    items: &[SeriesItem],
    date_parse_mode: DateParseMode,
) -> Option<TimeConverter> {
    items
        .first()
        .map(|item| TimeConverter::new(item.time_kind(), date_parse_mode))
}
