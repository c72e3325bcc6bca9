//! Structured logging for processes whose stdout is a report.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when `RUST_LOG` is unset or unparseable. Rejected settings are logged at
/// `warn`, so they show up without any configuration.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Install a JSON subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// Stdout is left to the caller's own output. Calls after the first are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(filter_from(std::env::var("RUST_LOG").ok().as_deref()))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init();
}

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
