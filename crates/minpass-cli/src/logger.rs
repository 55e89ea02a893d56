//! Logging setup for the minpass CLI.
//!
//! Log events go to stderr so stdout carries nothing but the per-artifact
//! progress lines.
//!
//! # Example
//!
//! ```rust,no_run
//! use minpass_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Starting build");
//! debug!("Reading artifact: {}", "index.js");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "minpass=debug,minpass_pipeline=debug,minpass_cli=debug";
const QUIET_FILTER: &str = "minpass=error,minpass_pipeline=error,minpass_cli=error";
const DEFAULT_FILTER: &str = "minpass=info,minpass_pipeline=info,minpass_cli=info";

/// Install the global tracing subscriber.
///
/// Call once, before any logging occurs.
///
/// # Verbosity Levels
///
/// 1. `--verbose`: DEBUG for minpass crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`: custom filter
/// 4. Default: INFO for minpass crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Install the global tracing subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber is process-global, so only the filters are checked here.

    #[test]
    fn test_verbose_filter() {
        let filter = filter_for(true, false).to_string();
        assert!(filter.contains("minpass_pipeline=debug"));
    }

    #[test]
    fn test_quiet_filter() {
        let filter = filter_for(false, true).to_string();
        assert!(filter.contains("minpass=error"));
        assert!(!filter.contains("debug"));
    }

    #[test]
    fn test_verbose_wins_over_quiet() {
        let filter = filter_for(true, true).to_string();
        assert!(filter.contains("debug"));
    }
}
