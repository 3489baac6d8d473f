//! Structured logging setup using `tracing-subscriber`.
//!
//! Console-only: the CLI is short-lived, so there is no rotating file
//! sink. Controlled by `RUST_LOG` (default: `info`).

use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr.
///
/// Human-readable output controlled by the `RUST_LOG` environment
/// variable (default: `info`).
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
