//! Telemetry helpers for applications embedding `chart-timeline`.
//!
//! The timeline logs through `tracing`: replace/remove/reset summaries at
//! `debug`, single-point updates at `trace`, rejected updates and palette
//! exhaustion at `warn`.

/// Filter used when `RUST_LOG` is unset: host crates at `warn`, the timeline
/// at `info`.
pub const DEFAULT_TIMELINE_FILTER: &str = "warn,chart_timeline=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TIMELINE_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_TIMELINE_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"chart_timeline=trace"` to follow every amend, append and insert.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
