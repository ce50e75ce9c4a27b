//! Telemetry initialization.
//!
//! Diagnostics go to stderr so stdout stays reserved for the one-line-per-file
//! completion output. Verbosity is controlled by `RUST_LOG` (standard
//! `tracing_subscriber::EnvFilter` syntax); unset, only warnings and errors
//! are shown.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Call once, before any spans are entered.
pub fn init() {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
