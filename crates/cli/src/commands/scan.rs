//! Directory scan command

use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;
use tabled::Tabled;

use scanner_lib::detect::SeededRandom;
use scanner_lib::pipeline::{ScanOptions, ScanRunner, ScanSummary};

use crate::output::{print_success, print_table, print_warning, OutputFormat};

/// Row for the per-file summary table
#[derive(Tabled, Serialize)]
struct FileRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Rows")]
    rows: String,
    #[tabled(rename = "Outliers")]
    outliers: String,
    #[tabled(rename = "Output")]
    output: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Scan a directory: sample each input file, flag outliers, and write
/// the per-file output tables
pub fn run_scan(
    directory: &Path,
    options: ScanOptions,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    if !directory.is_dir() {
        bail!("{} is not a directory", directory.display());
    }

    let mut builder = ScanRunner::builder().options(options);
    if let Some(seed) = seed {
        builder = builder.random_source(Box::new(SeededRandom::new(seed)));
    }
    let mut runner = builder.build();

    let summary = runner.run(directory)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => print_summary(&summary),
    }

    Ok(())
}

fn print_summary(summary: &ScanSummary) {
    if summary.files_seen == 0 {
        print_warning("No input files found");
        return;
    }

    let rows: Vec<FileRow> = summary
        .reports
        .iter()
        .map(|report| FileRow {
            file: report.input.display().to_string(),
            rows: report.rows.to_string(),
            outliers: report.outliers.to_string(),
            output: report
                .output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
            status: match &report.skipped {
                Some(reason) => format!("skipped: {}", reason),
                None => "ok".to_string(),
            },
        })
        .collect();

    print_table(&rows, OutputFormat::Table);

    if summary.files_skipped > 0 {
        print_warning(&format!("{} file(s) skipped", summary.files_skipped));
    }

    let outliers = summary.total_outliers();
    if outliers > 0 {
        print_success(&format!(
            "Processed {} file(s), {} outlier(s) flagged",
            summary.files_processed, outliers
        ));
    } else {
        print_success(&format!(
            "Processed {} file(s), no outliers found",
            summary.files_processed
        ));
    }
}
