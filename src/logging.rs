//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber writing to stderr.
///
/// The filter is read from `RUST_LOG` and falls back to `info`. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
