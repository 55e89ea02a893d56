//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        // The pipeline error carries its own code and help text.
        CliError::Pipeline(e) => Report::new(e),
        CliError::ArtifactsFailed { failed, total } => miette::miette!(
            help = "Each failure was printed above. Re-run with --failure-policy abort to stop at the first one.",
            "{} of {} artifacts failed to minify",
            failed,
            total
        ),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}
