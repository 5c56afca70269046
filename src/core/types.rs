use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Calendar day interpreted as UTC midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusinessDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BusinessDay {
    #[must_use]
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

/// Which of the two canonical time representations a value uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeKind {
    BusinessDay,
    Timestamp,
}

impl fmt::Display for TimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusinessDay => f.write_str("business day"),
            Self::Timestamp => f.write_str("utc timestamp"),
        }
    }
}

/// Raw time value as supplied by the caller.
///
/// A `YYYY-MM-DD` string belongs to the business-day representation and is
/// parsed during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    BusinessDay(BusinessDay),
    Timestamp(i64),
    DateString(String),
}

impl TimeInput {
    #[must_use]
    pub fn kind(&self) -> TimeKind {
        match self {
            Self::BusinessDay(_) | Self::DateString(_) => TimeKind::BusinessDay,
            Self::Timestamp(_) => TimeKind::Timestamp,
        }
    }
}

impl From<BusinessDay> for TimeInput {
    fn from(value: BusinessDay) -> Self {
        Self::BusinessDay(value)
    }
}

impl From<i64> for TimeInput {
    fn from(value: i64) -> Self {
        Self::Timestamp(value)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        Self::DateString(value.to_owned())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        Self::DateString(value)
    }
}

/// Canonical UTC-anchored instant.
///
/// Equality, hashing and ordering look at `timestamp` only; the retained
/// business day is informational.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp: i64,
    pub business_day: Option<BusinessDay>,
}

impl TimePoint {
    #[must_use]
    pub fn from_timestamp(timestamp: i64) -> Self {
        Self {
            timestamp,
            business_day: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TimeKind {
        if self.business_day.is_some() {
            TimeKind::BusinessDay
        } else {
            TimeKind::Timestamp
        }
    }
}

impl PartialEq for TimePoint {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
    }
}

impl Eq for TimePoint {}

impl Hash for TimePoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timestamp.hash(state);
    }
}

impl PartialOrd for TimePoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimePoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}
