use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::core::types::{TimeInput, TimeKind};
use crate::error::ChartResult;

/// Small integer color handle. `0` means "no per-point override".
pub type ColorId = u16;

pub const DEFAULT_COLOR_ID: ColorId = 0;

/// Resolves per-point color strings into compact ids.
///
/// Owned by the style layer; the timeline only borrows it for the duration of
/// a single call.
pub trait ColorAllocator {
    fn add_color(&mut self, color: &str) -> ColorId;
}

/// Single-value observation used by line, area and histogram series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueItem {
    pub time: TimeInput,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Bar/candlestick observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcItem {
    pub time: TimeInput,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Incoming observation. The shape is decided once, when the item is built
/// or deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesItem {
    Ohlc(OhlcItem),
    Value(ValueItem),
}

impl SeriesItem {
    #[must_use]
    pub fn value(time: impl Into<TimeInput>, value: f64) -> Self {
        Self::Value(ValueItem {
            time: time.into(),
            value,
            color: None,
        })
    }

    #[must_use]
    pub fn colored_value(time: impl Into<TimeInput>, value: f64, color: impl Into<String>) -> Self {
        Self::Value(ValueItem {
            time: time.into(),
            value,
            color: Some(color.into()),
        })
    }

    #[must_use]
    pub fn ohlc(time: impl Into<TimeInput>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self::Ohlc(OhlcItem {
            time: time.into(),
            open,
            high,
            low,
            close,
        })
    }

    pub fn value_from_decimal(time: impl Into<TimeInput>, value: Decimal) -> ChartResult<Self> {
        Ok(Self::value(time, decimal_to_f64(value, "value")?))
    }

    pub fn ohlc_from_decimal(
        time: impl Into<TimeInput>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Ok(Self::ohlc(
            time,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        ))
    }

    #[must_use]
    pub fn time(&self) -> &TimeInput {
        match self {
            Self::Ohlc(item) => &item.time,
            Self::Value(item) => &item.time,
        }
    }

    #[must_use]
    pub fn time_kind(&self) -> TimeKind {
        self.time().kind()
    }
}

/// Uniform per-row storage: open, high, low, close and a color id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarValue {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub color: ColorId,
}

impl BarValue {
    #[must_use]
    pub fn flat(value: f64, color: ColorId) -> Self {
        Self {
            open: value,
            high: value,
            low: value,
            close: value,
            color,
        }
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64, f64, f64, ColorId) {
        (self.open, self.high, self.low, self.close, self.color)
    }
}

/// Projects an observation into the five-slot row layout shared by every
/// series kind.
pub fn project_bar_value(
    item: &SeriesItem,
    colors: Option<&mut (dyn ColorAllocator + '_)>,
) -> BarValue {
    match item {
        SeriesItem::Value(item) => {
            let color = match (item.color.as_deref(), colors) {
                (Some(color), Some(allocator)) => allocator.add_color(color),
                _ => DEFAULT_COLOR_ID,
            };
            BarValue::flat(item.value, color)
        }
        SeriesItem::Ohlc(item) => BarValue {
            open: item.open,
            high: item.high,
            low: item.low,
            close: item.close,
            color: DEFAULT_COLOR_ID,
        },
    }
}
