use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::types::TimePoint;

/// Span code for the very first point and for points that cross no boundary.
pub const BASE_SPAN: u32 = 20;
pub const DAY_SPAN: u32 = 50;
pub const MONTH_SPAN: u32 = 60;
pub const YEAR_SPAN: u32 = 70;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

struct SpanDivisor {
    divisor_ms: i64,
    span: u32,
}

// Ascending; scanned from the end so the coarsest crossed bucket wins.
// The 1 ms bucket maps back to the base span.
const INTRADAY_SPAN_DIVISORS: [SpanDivisor; 9] = [
    SpanDivisor {
        divisor_ms: 1,
        span: 20,
    },
    SpanDivisor {
        divisor_ms: MILLIS_PER_SECOND,
        span: 19,
    },
    SpanDivisor {
        divisor_ms: MILLIS_PER_MINUTE,
        span: 20,
    },
    SpanDivisor {
        divisor_ms: 5 * MILLIS_PER_MINUTE,
        span: 21,
    },
    SpanDivisor {
        divisor_ms: 30 * MILLIS_PER_MINUTE,
        span: 22,
    },
    SpanDivisor {
        divisor_ms: MILLIS_PER_HOUR,
        span: 30,
    },
    SpanDivisor {
        divisor_ms: 3 * MILLIS_PER_HOUR,
        span: 31,
    },
    SpanDivisor {
        divisor_ms: 6 * MILLIS_PER_HOUR,
        span: 32,
    },
    SpanDivisor {
        divisor_ms: 12 * MILLIS_PER_HOUR,
        span: 33,
    },
];

/// Time-axis mark emitted for every newly indexed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickMark {
    pub span: u32,
    pub time: TimePoint,
    pub index: usize,
}

/// Classifies the coarsest calendar or clock boundary crossed between
/// `previous` and `current`, both read in UTC.
#[must_use]
pub fn tick_mark_span(current: &TimePoint, previous: Option<&TimePoint>) -> u32 {
    let Some(previous) = previous else {
        return BASE_SPAN;
    };

    if let (Some(current_dt), Some(previous_dt)) = (
        unix_seconds_to_datetime(current.timestamp),
        unix_seconds_to_datetime(previous.timestamp),
    ) {
        if current_dt.year() != previous_dt.year() {
            return YEAR_SPAN;
        }
        if current_dt.month() != previous_dt.month() {
            return MONTH_SPAN;
        }
        if current_dt.day() != previous_dt.day() {
            return DAY_SPAN;
        }
    }

    let current_ms = current.timestamp.saturating_mul(MILLIS_PER_SECOND);
    let previous_ms = previous.timestamp.saturating_mul(MILLIS_PER_SECOND);
    INTRADAY_SPAN_DIVISORS
        .iter()
        .rev()
        .find(|bucket| {
            previous_ms.div_euclid(bucket.divisor_ms) != current_ms.div_euclid(bucket.divisor_ms)
        })
        .map_or(BASE_SPAN, |bucket| bucket.span)
}
