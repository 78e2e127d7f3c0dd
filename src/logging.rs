//! Logging setup for binaries embedding the crate
//!
//! Library code only emits `tracing` events; installing a subscriber is up
//! to the program.

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber
///
/// `RUST_LOG` wins when set, otherwise the level is `debug` or `info`
/// depending on `debug`. Logs go to stderr so stdout stays clean for
/// rendered output.
pub fn init_logging(debug: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(debug))
        .try_init()
}
