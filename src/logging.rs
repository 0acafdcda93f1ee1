//! Diagnostic logging setup for the binary.
//!
//! Level comes from `RWORKTIME_LOG` (same syntax as `RUST_LOG`), default
//! `warn`. Output goes to stderr so it never mixes with command output.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RWORKTIME_LOG";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
