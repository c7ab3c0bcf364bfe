#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the scaffold generator.
//!
//! Library crates log through `tracing`; binaries call [`init`] once to install
//! a stderr subscriber. `RUST_LOG` overrides the configured level.

use tracing_subscriber::EnvFilter;

/// Install a formatted stderr subscriber filtered at `level`.
///
/// Returns `false` when a global subscriber was already installed (for example
/// by a test harness), in which case the existing one is kept.
pub fn init(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Map a verbosity flag onto a filter directive.
pub fn level_for(verbose: bool, configured: &str) -> &str {
    if verbose {
        "debug"
    } else {
        configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_overrides_configured_level() {
        assert_eq!(level_for(true, "warn"), "debug");
        assert_eq!(level_for(false, "warn"), "warn");
    }

    #[test]
    fn second_init_keeps_existing_subscriber() {
        init("info");
        assert!(!init("debug"));
    }
}
