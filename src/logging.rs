//! Diagnostic logging setup.
//!
//! Events go to stderr so the dump on stdout stays clean. The filter comes
//! from `BCTX_LOG` and defaults to warnings only.

use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "BCTX_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global tracing subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
