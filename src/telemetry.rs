//! Telemetry helpers for applications embedding `horizon-grid`.
//!
//! Levels used by the crate:
//! - `warn`: a grid cell whose series has no defined value.
//! - `debug`: index build counters, dataset row totals, grid layout and scene
//!   summaries, engine renders.
//! - `trace`: each dropped row or omitted pollutant value during indexing,
//!   and each pointer move resolved to a cell.
//!
//! This module only offers an opt-in default subscriber; hosts can wire their own.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
