//! Per-artifact size reports and progress output.

use std::fmt;

use crate::Error;

/// Format a byte count with a binary unit prefix.
///
/// ```
/// use minpass_pipeline::format_size;
///
/// assert_eq!(format_size(400), "400.00 B");
/// assert_eq!(format_size(1024), "1.00 KiB");
/// assert_eq!(format_size(12_636), "12.34 KiB");
/// assert_eq!(format_size(1_572_864), "1.50 MiB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

/// Before/after sizes of one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub from_size: u64,
    pub to_size: u64,
    pub from_brotli: u64,
    pub to_brotli: u64,
}

impl SizeReport {
    /// `to_size / from_size * 100`, unrounded and unclamped.
    pub fn ratio(&self) -> f64 {
        percentage(self.to_size, self.from_size)
    }

    /// `to_brotli / from_brotli * 100`, unrounded and unclamped.
    pub fn brotli_ratio(&self) -> f64 {
        percentage(self.to_brotli, self.from_brotli)
    }
}

fn percentage(to: u64, from: u64) -> f64 {
    (to as f64 / from as f64) * 100.0
}

/// The outcome of processing one artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactReport {
    /// 1-based position in the artifact sequence.
    pub index: usize,
    pub total: usize,
    pub file_name: String,
    pub sizes: SizeReport,
}

impl ArtifactReport {
    pub fn progress_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtifactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.sizes;
        write!(
            f,
            "Minifying {}/{}: {}... {} --> {} ({:.2}%) / brotli: {} --> {} ({:.2}%)",
            self.index,
            self.total,
            self.file_name,
            format_size(s.from_size),
            format_size(s.to_size),
            s.ratio(),
            format_size(s.from_brotli),
            format_size(s.to_brotli),
            s.brotli_ratio(),
        )
    }
}

/// Receives reports in artifact order.
pub trait ProgressSink: Send {
    fn on_report(&mut self, report: &ArtifactReport);

    /// Called for artifacts skipped under the `continue` failure policy.
    fn on_failure(&mut self, _index: usize, _total: usize, _file_name: &str, _error: &Error) {}
}

/// Prints one progress line per artifact to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ProgressSink for StdoutSink {
    fn on_report(&mut self, report: &ArtifactReport) {
        println!("{}", report);
    }

    fn on_failure(&mut self, index: usize, total: usize, file_name: &str, error: &Error) {
        println!("Minifying {}/{}: {}... failed: {}", index, total, file_name, error);
    }
}

impl ProgressSink for Vec<ArtifactReport> {
    fn on_report(&mut self, report: &ArtifactReport) {
        self.push(report.clone());
    }
}
