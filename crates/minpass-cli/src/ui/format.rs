//! Formatting for durations and the end-of-run summary.

use console::Term;
use minpass_pipeline::{DriverSummary, format_size};
use owo_colors::OwoColorize;
use std::time::Duration;

use super::colors_enabled;

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use minpass_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// `3 artifacts: 1.00 MiB --> 400.00 KiB (39.06%) / brotli: ...`
pub(crate) fn totals_line(summary: &DriverSummary) -> String {
    let totals = summary.totals();
    let count = summary.processed();
    let noun = if count == 1 { "artifact" } else { "artifacts" };

    if count == 0 {
        return format!("0 {}", noun);
    }

    format!(
        "{} {}: {} --> {} ({:.2}%) / brotli: {} --> {} ({:.2}%)",
        count,
        noun,
        format_size(totals.from_size),
        format_size(totals.to_size),
        totals.ratio(),
        format_size(totals.from_brotli),
        format_size(totals.to_brotli),
        totals.brotli_ratio(),
    )
}

/// Print the run summary to stderr.
pub fn print_run_summary(summary: &DriverSummary, elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).min(80);
    let rule = "─".repeat(width);
    let colors = colors_enabled();

    if colors {
        eprintln!("\n{}", "Minification Summary".bold().underline());
    } else {
        eprintln!("\nMinification Summary");
    }
    eprintln!("{}", rule);

    for failure in &summary.failures {
        let line = format!("#{} {}", failure.index, failure.file_name);
        if colors {
            eprintln!("  {} {} {}", "✗".red(), line.bright_white(), failure.error.dimmed());
        } else {
            eprintln!("  ✗ {} {}", line, failure.error);
        }
    }

    let totals = totals_line(summary);
    let took = format_duration(elapsed);
    if colors {
        eprintln!("  {} {} in {}", "Total:".bold(), totals.green(), took.green());
    } else {
        eprintln!("  Total: {} in {}", totals, took);
    }
    eprintln!("{}", rule);
}
