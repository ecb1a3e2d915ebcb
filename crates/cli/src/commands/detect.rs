//! Single-file detection command

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tabled::Tabled;

use scanner_lib::detect::{
    sample, OutlierDetector, RandomSource, SeededRandom, SystemRandom, WindowStats,
};
use scanner_lib::io::read_observations;

use crate::output::{
    color_deviation, format_percent, format_price, print_info, print_table, print_warning,
    OutputFormat,
};

/// Row for the outlier table
#[derive(Tabled, Serialize)]
struct OutlierRow {
    #[tabled(rename = "Stock-ID")]
    stock_id: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Stock Price")]
    price: String,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Deviation")]
    deviation: String,
    #[tabled(rename = "Percent Deviation")]
    percent_deviation: String,
}

/// Analyze one file and print flagged outliers without writing an
/// output table
pub fn run_detect(
    file: &Path,
    window_size: usize,
    threshold: f64,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let observations =
        read_observations(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let mut rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(SystemRandom),
    };

    let window = sample(&observations, window_size, rng.as_mut())
        .with_context(|| format!("Cannot sample {}", file.display()))?;

    let detector = OutlierDetector::new(threshold);
    let outliers = detector.detect(window)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outliers)?);
        }
        OutputFormat::Table => {
            let stats = WindowStats::compute(window);
            print_info(&format!(
                "{} rows, window of {}: mean {}, stddev {}",
                observations.len(),
                window.len(),
                format_price(stats.mean),
                format_price(stats.std_dev)
            ));

            if outliers.is_empty() {
                print_warning("No outliers found");
                return Ok(());
            }

            let rows: Vec<OutlierRow> = outliers
                .iter()
                .map(|record| OutlierRow {
                    stock_id: record.stock_id.clone(),
                    timestamp: record.timestamp.clone(),
                    price: format_price(record.price),
                    mean: format_price(record.mean),
                    deviation: color_deviation(record.deviation),
                    percent_deviation: format_percent(record.percent_deviation),
                })
                .collect();

            print_table(&rows, OutputFormat::Table);
        }
    }

    Ok(())
}
