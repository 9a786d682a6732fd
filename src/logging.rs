//! Log output setup.
//!
//! Logs go to stderr; stdout is reserved for report payloads.

use tracing_subscriber::EnvFilter;

/// Pick the filter directive: explicit flag, then `RUST_LOG`, then config.
pub fn resolve_filter(cli_level: Option<&str>, rust_log: Option<&str>, config_level: &str) -> String {
    cli_level
        .or(rust_log)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(config_level)
        .to_string()
}

/// Install the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("Warning: invalid log filter '{directive}' ({err}), falling back to info");
        EnvFilter::new("info")
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
