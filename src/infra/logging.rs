//! Logging setup for the binary.
//!
//! Diagnostics go through `tracing` to stderr so that stdout stays reserved for the
//! console report. `RUST_LOG` wins over the `--verbose` flag.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// # Errors
/// Fails if a global subscriber has already been installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
