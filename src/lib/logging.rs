//! Logging utilities for formatted output.
//!
//! Shared formatting helpers plus a small timer for logging operation
//! summaries from the CLI commands.

use std::time::{Duration, Instant};

/// Formats a count with thousands separators (e.g., `1,234,567`).
#[must_use]
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();

    bytes
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a duration in human-readable form.
///
/// # Examples
///
/// ```
/// use mzgzip_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a byte throughput rate with appropriate units.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(bytes: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} B/s", format_count(bytes));
    }

    let rate = bytes as f64 / secs;
    if rate >= 1_048_576.0 {
        format!("{:.1} MiB/s", rate / 1_048_576.0)
    } else if rate >= 1024.0 {
        format!("{:.1} KiB/s", rate / 1024.0)
    } else {
        format!("{} B/s", format_count(rate as u64))
    }
}

/// Operation timing and summary helper.
///
/// # Examples
///
/// ```no_run
/// use mzgzip_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Compressing");
///
/// // ... do work ...
///
/// timer.log_completion(1_048_576); // log with byte count
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with a byte count and throughput.
    pub fn log_completion(&self, bytes: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} bytes in {} ({})",
            self.operation,
            format_count(bytes),
            format_duration(duration),
            format_rate(bytes, duration)
        );
    }
}
