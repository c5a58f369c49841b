//! Tracing/logging initialization.
//!
//! The engine crates only emit `tracing` events; wiring a subscriber is
//! left to the process edge so libraries stay silent under test unless
//! a harness opts in.

use tracing_subscriber::EnvFilter;

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Structured JSON, one object per line.
    #[default]
    Json,
    /// Human-readable compact output for local runs.
    Compact,
}

/// Initialize tracing/logging with JSON output.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_format(LogFormat::Json);
}

/// Initialize tracing/logging with an explicit output format.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_with_format(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
