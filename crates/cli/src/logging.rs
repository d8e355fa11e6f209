//! Log output for the CLI.
//!
//! Logs go to stderr so stdout stays clean for element JSON. The filter is
//! taken from `REHYDRATE_LOG`, then from the config file, then defaults to
//! `warn`. `--quiet` turns logging off unless `REHYDRATE_LOG` is set.

use tracing_subscriber::EnvFilter;

pub(crate) const LOG_ENV: &str = "REHYDRATE_LOG";

pub(crate) fn init_logging(configured: Option<&str>, quiet: bool) {
    let fallback = if quiet {
        "off"
    } else {
        configured.unwrap_or("warn")
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed (e.g. in tests); keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();

    tracing::debug!(filter = fallback, "logging initialized");
}
