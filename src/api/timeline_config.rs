use serde::{Deserialize, Serialize};

use crate::core::DateParseMode;

/// Construction-time options for [`super::TimelineIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub date_parse_mode: DateParseMode,
}

impl TimelineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date_parse_mode(mut self, date_parse_mode: DateParseMode) -> Self {
        self.date_parse_mode = date_parse_mode;
        self
    }
}
