pub mod bar_value;
pub mod palette;
pub mod primitives;
pub mod series_bars;
pub mod tick_marks;
pub mod time_normalizer;
pub mod types;

pub use bar_value::{
    BarValue, ColorAllocator, ColorId, DEFAULT_COLOR_ID, OhlcItem, SeriesItem, ValueItem,
    project_bar_value,
};
pub use palette::Palette;
pub use series_bars::{SeriesBars, SeriesRow, SeriesUpdate, UpdateScope};
pub use tick_marks::{BASE_SPAN, DAY_SPAN, MONTH_SPAN, TickMark, YEAR_SPAN, tick_mark_span};
pub use time_normalizer::{
    DateParseMode, TimeConverter, business_day_to_time_point, normalize_time, parse_date_string,
    select_time_converter,
};
pub use types::{BusinessDay, TimeInput, TimeKind, TimePoint};
