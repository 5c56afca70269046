//! chart-timeline: merged time-series index for Lightweight Charts-style
//! charting.
//!
//! Series feed observations into a [`TimelineIndex`], which keeps one
//! strictly ordered, densely indexed timeline across all of them and answers
//! every mutation with an [`UpdatePacket`] that the time axis and per-series
//! bar storage apply incrementally.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{PlotSeries, SeriesHandle, TimelineConfig, TimelineIndex, UpdatePacket};
pub use error::{ChartError, ChartResult};
