//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber writing to stderr
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects `debug` and
/// the default is `warn`. Calling this more than once is a no-op.
pub fn init(verbose: bool) {
    let level = if verbose { "ticklist=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails only if a subscriber is already installed
    let _ = subscriber.try_init();
}
