//! Diagnostic logging
//!
//! Logs go to stderr so they never mix with the listing on stdout. Filtering
//! comes from `FILIST_LOG` using `tracing_subscriber::EnvFilter` directives
//! (e.g. `FILIST_LOG=debug` or `FILIST_LOG=filist::tree=trace`). Logging is
//! off when the variable is unset.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FILIST_LOG";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = build_env_filter(std::env::var(LOG_ENV).ok().as_deref());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Build the filter from a directive string; unset means off.
///
/// An unparsable directive falls back to `warn` and reports itself once.
pub fn build_env_filter(directives: Option<&str>) -> EnvFilter {
    match directives.map(str::trim) {
        None | Some("") => EnvFilter::new("off"),
        Some(spec) => EnvFilter::try_new(spec).unwrap_or_else(|e| {
            eprintln!("filist: ignoring invalid {}: {}", LOG_ENV, e);
            EnvFilter::new("warn")
        }),
    }
}
