//! Observability for scan runs
//!
//! Provides event-tagged structured logging in a consistent shape for
//! scan lifecycle and per-file outcomes.

use tracing::{info, warn};

/// Structured logger for scan events
///
/// Scoped to the directory being scanned; every event carries it.
#[derive(Clone)]
pub struct ScanLogger {
    root: String,
}

impl ScanLogger {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Log the start of a directory scan
    pub fn log_scan_started(&self, files_found: usize, files_to_process: usize) {
        info!(
            event = "scan_started",
            root = %self.root,
            files_found = files_found,
            files_to_process = files_to_process,
            "Starting scan"
        );
    }

    /// Log a successfully processed file
    pub fn log_file_processed(&self, file: &str, rows: usize, outliers: usize) {
        info!(
            event = "file_processed",
            root = %self.root,
            file = %file,
            rows = rows,
            outliers = outliers,
            "Processed file"
        );
    }

    /// Log a skipped file with the reason
    pub fn log_file_skipped(&self, file: &str, reason: &str) {
        warn!(
            event = "file_skipped",
            root = %self.root,
            file = %file,
            reason = %reason,
            "Skipping file"
        );
    }

    /// Log the end of a scan
    pub fn log_scan_finished(&self, processed: usize, skipped: usize, outliers: usize) {
        info!(
            event = "scan_finished",
            root = %self.root,
            files_processed = processed,
            files_skipped = skipped,
            outliers = outliers,
            "Scan finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_logger_creation() {
        let logger = ScanLogger::new("data/LSE");
        assert_eq!(logger.root, "data/LSE");
    }
}
