// src/logging.rs

//! Tracing subscriber setup
//!
//! Shim stdout must carry nothing but delegate output, so all log output
//! goes to stderr. The filter comes from `$CONFSHIM_LOG` and defaults to
//! `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "CONFSHIM_LOG";

/// Install the global subscriber
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
