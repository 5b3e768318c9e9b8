//! Logging initialization for the Repoship binaries.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber.
///
/// Log level comes from `RUST_LOG` when set, otherwise from `level`.
/// Output goes to stderr so command output on stdout stays clean.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
