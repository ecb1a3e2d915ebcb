//! Per-file scan pipeline
//!
//! Drives discovery, parsing, sampling, detection, and output writing
//! for every input file in a directory. Files are processed
//! sequentially and independently; a failing file is logged and
//! skipped, never fatal to the run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::detect::{sample, OutlierDetector, RandomSource, SystemRandom};
use crate::error::ScanError;
use crate::io::{discover_input_files, output_path, read_observations, write_outliers};
use crate::observability::ScanLogger;

/// Default number of observations per sampled window
pub const DEFAULT_WINDOW_SIZE: usize = 30;

/// Default cap on files processed per scan
pub const DEFAULT_MAX_FILES: usize = 2;

/// Options controlling a scan run
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Number of observations in each sampled window
    pub window_size: usize,
    /// Standard-deviation multiple for flagging
    pub threshold: f64,
    /// Maximum number of files processed per scan
    pub max_files: usize,
    /// Input file extension to match
    pub extension: String,
    /// Suffix appended to the stem of output file names
    pub output_suffix: String,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            threshold: 2.0,
            max_files: DEFAULT_MAX_FILES,
            extension: "csv".to_string(),
            output_suffix: "_outliers".to_string(),
        }
    }
}

/// Outcome of a single input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub rows: usize,
    pub outliers: usize,
    /// Output file path, when outliers were written
    pub output: Option<PathBuf>,
    /// Reason the file was skipped, when it was
    pub skipped: Option<String>,
}

impl FileReport {
    fn skipped(input: &Path, reason: String) -> Self {
        Self {
            input: input.to_path_buf(),
            rows: 0,
            outliers: 0,
            output: None,
            skipped: Some(reason),
        }
    }
}

/// Totals for a directory scan
#[derive(Debug, Default, Serialize)]
pub struct ScanSummary {
    pub files_seen: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub reports: Vec<FileReport>,
}

impl ScanSummary {
    /// Total outliers flagged across all processed files
    pub fn total_outliers(&self) -> usize {
        self.reports.iter().map(|r| r.outliers).sum()
    }
}

/// Runs the scan pipeline over input files
pub struct ScanRunner {
    options: ScanOptions,
    detector: OutlierDetector,
    rng: Box<dyn RandomSource>,
}

impl ScanRunner {
    /// Create a runner with the given options and a clock-derived
    /// random source
    pub fn new(options: ScanOptions) -> Self {
        Self::builder().options(options).build()
    }

    pub fn builder() -> ScanRunnerBuilder {
        ScanRunnerBuilder::default()
    }

    /// Process every matching file in a directory, up to the file cap
    ///
    /// Per-file failures are recorded as skipped reports; only a
    /// failure to enumerate the directory itself is returned as an
    /// error.
    pub fn run(&mut self, directory: &Path) -> Result<ScanSummary, ScanError> {
        let logger = ScanLogger::new(directory.display().to_string());
        let files = discover_input_files(directory, &self.options.extension)?;

        if files.is_empty() {
            warn!(directory = %directory.display(), "No input files found");
            return Ok(ScanSummary::default());
        }

        let limit = self.options.max_files.min(files.len());
        if limit < files.len() {
            info!(
                cap = self.options.max_files,
                left_unprocessed = files.len() - limit,
                "File cap reached"
            );
        }
        logger.log_scan_started(files.len(), limit);

        let mut summary = ScanSummary {
            files_seen: files.len(),
            ..ScanSummary::default()
        };

        for path in files.iter().take(limit) {
            match self.process_file(path) {
                Ok(report) => {
                    logger.log_file_processed(
                        &path.display().to_string(),
                        report.rows,
                        report.outliers,
                    );
                    summary.files_processed += 1;
                    summary.reports.push(report);
                }
                Err(err) => {
                    logger.log_file_skipped(&path.display().to_string(), &err.to_string());
                    summary.files_skipped += 1;
                    summary.reports.push(FileReport::skipped(path, err.to_string()));
                }
            }
        }

        logger.log_scan_finished(
            summary.files_processed,
            summary.files_skipped,
            summary.total_outliers(),
        );
        Ok(summary)
    }

    /// Run the full pipeline for one input file
    ///
    /// Parse, check the row count against the window size, sample,
    /// detect, and write the output table when anything was flagged.
    pub fn process_file(&mut self, path: &Path) -> Result<FileReport, ScanError> {
        let observations = read_observations(path)?;
        debug!(
            file = %path.display(),
            rows = observations.len(),
            "Parsed input file"
        );

        if observations.len() < self.options.window_size {
            return Err(ScanError::InsufficientData {
                rows: observations.len(),
                required: self.options.window_size,
            });
        }

        let window = sample(&observations, self.options.window_size, self.rng.as_mut())?;
        let outliers = self.detector.detect(window)?;

        let destination = output_path(path, &self.options.output_suffix);
        let written = write_outliers(&destination, &outliers)?;

        Ok(FileReport {
            input: path.to_path_buf(),
            rows: observations.len(),
            outliers: outliers.len(),
            output: written.then_some(destination),
            skipped: None,
        })
    }
}

/// Builder for creating a scan runner
#[derive(Default)]
pub struct ScanRunnerBuilder {
    options: Option<ScanOptions>,
    rng: Option<Box<dyn RandomSource>>,
}

impl ScanRunnerBuilder {
    pub fn options(mut self, options: ScanOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Inject a randomness source (deterministic sources for tests and
    /// seeded runs)
    pub fn random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn build(self) -> ScanRunner {
        let options = self.options.unwrap_or_default();
        ScanRunner {
            detector: OutlierDetector::new(options.threshold),
            rng: self.rng.unwrap_or_else(|| Box::new(SystemRandom)),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::SeededRandom;
    use std::fs;

    fn runner() -> ScanRunner {
        ScanRunner::builder()
            .random_source(Box::new(SeededRandom::new(42)))
            .build()
    }

    /// 30 rows: 29 at 100.0 and one at 1000.0
    ///
    /// mean = 130, population variance = 26100, stddev ~= 161.6, so the
    /// spike deviates by 870 against a 2-sigma limit of ~323.1.
    fn rows_with_spike() -> String {
        let mut rows = String::new();
        for i in 0..29 {
            rows.push_str(&format!("FLTR,2023-09-01 09:{:02}:00,100.0\n", i));
        }
        rows.push_str("FLTR,2023-09-01 09:29:00,1000.0\n");
        rows
    }

    fn flat_rows() -> String {
        let mut rows = String::new();
        for i in 0..30 {
            rows.push_str(&format!("GSK,2023-09-01 09:{:02}:00,50.0\n", i));
        }
        rows
    }

    #[test]
    fn test_process_file_writes_output_table() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flutter.csv");
        fs::write(&input, rows_with_spike()).unwrap();

        let report = runner().process_file(&input).unwrap();
        assert_eq!(report.rows, 30);
        assert_eq!(report.outliers, 1);

        let output = report.output.unwrap();
        assert_eq!(output.file_name().unwrap(), "flutter_outliers.csv");

        let content = fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Stock-ID,Timestamp,Stock Price,Mean,Deviation,Percent Deviation"
        );
        assert!(lines.next().unwrap().starts_with("FLTR,2023-09-01 09:29:00,1000,130,870,"));
    }

    #[test]
    fn test_process_file_without_outliers_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flat.csv");
        fs::write(&input, flat_rows()).unwrap();

        let report = runner().process_file(&input).unwrap();
        assert_eq!(report.outliers, 0);
        assert!(report.output.is_none());
        assert!(!dir.path().join("flat_outliers.csv").exists());
    }

    #[test]
    fn test_run_processes_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("aaa.csv"), rows_with_spike()).unwrap();
        fs::write(dir.path().join("bbb.csv"), flat_rows()).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let summary = runner().run(dir.path()).unwrap();
        assert_eq!(summary.files_seen, 2);
        assert_eq!(summary.files_processed, 2);
        assert_eq!(summary.files_skipped, 0);
        assert_eq!(summary.total_outliers(), 1);
        assert!(dir.path().join("aaa_outliers.csv").exists());
        assert!(!dir.path().join("bbb_outliers.csv").exists());
    }

    #[test]
    fn test_run_respects_file_cap() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["aaa.csv", "bbb.csv", "ccc.csv"] {
            fs::write(dir.path().join(name), flat_rows()).unwrap();
        }

        let summary = runner().run(dir.path()).unwrap();
        assert_eq!(summary.files_seen, 3);
        assert_eq!(summary.reports.len(), 2);
    }

    #[test]
    fn test_short_file_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("short.csv"), "GSK,2023-09-01,50.0\n").unwrap();
        fs::write(dir.path().join("zfull.csv"), rows_with_spike()).unwrap();

        let summary = runner().run(dir.path()).unwrap();
        assert_eq!(summary.files_processed, 1);
        assert_eq!(summary.files_skipped, 1);

        let skipped = &summary.reports[0];
        assert!(skipped.skipped.as_deref().unwrap().contains("not enough rows"));
    }

    #[test]
    fn test_bad_price_skips_file_not_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut rows = rows_with_spike();
        rows.push_str("FLTR,2023-09-01 09:30:00,broken\n");
        fs::write(dir.path().join("bad.csv"), rows).unwrap();

        let summary = runner().run(dir.path()).unwrap();
        assert_eq!(summary.files_skipped, 1);
        assert!(summary.reports[0]
            .skipped
            .as_deref()
            .unwrap()
            .contains("invalid price"));
    }

    #[test]
    fn test_empty_directory_yields_empty_summary() {
        let dir = tempfile::tempdir().unwrap();

        let summary = runner().run(dir.path()).unwrap();
        assert_eq!(summary.files_seen, 0);
        assert!(summary.reports.is_empty());
    }
}
