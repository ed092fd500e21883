//! Logging setup using `tracing-subscriber`.
//!
//! Logs go to stderr so `--json` output on stdout stays parseable. `RUST_LOG`
//! overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,csvlint={level},csvlint_cli={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
