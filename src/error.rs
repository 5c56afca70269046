use thiserror::Error;

use crate::core::TimeKind;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("time representation mismatch: series uses {expected}, got {found}")]
    TimeRepresentationMismatch { expected: TimeKind, found: TimeKind },

    #[error("missing expected timeline entry: {0}")]
    MissingExpectedEntry(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
