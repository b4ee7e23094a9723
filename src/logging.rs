//! Diagnostics for the command-line tools.
//!
//! Reads `RUST_LOG`; falls back to the configured filter. Output goes to
//! stderr in compact format so generated files and calc results on stdout stay
//! clean.
//!
//! ```bash
//! RUST_LOG=mylib=debug mylib-cli calc div 7 0
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
