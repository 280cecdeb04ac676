//! # medlogs-logging
//!
//! Diagnostics and housekeeping output for medlogs. Everything goes to stderr;
//! stdout is reserved for reports and search results.
//!
//! ## Key Types
//!
//! - [`Logger`] - Renders housekeeping events (moved, pruned, backed up)
//! - [`LogEvent`] - The housekeeping events
//! - [`LogFormat`] - Output formats (Pretty, JSON, Compact)

mod events;

pub use events::{LogEvent, LogFormat, Logger};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter from `RUST_LOG` when set, otherwise from `level`. An unparseable
/// `level` falls back to `warn`.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global tracing subscriber. Returns `false` when one was
/// already installed.
pub fn init_tracing(level: &str, format: LogFormat) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(level));
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Compact => registry.with(layer.compact().without_time()).try_init(),
        LogFormat::Pretty => registry.with(layer).try_init(),
    }
    .is_ok()
}
