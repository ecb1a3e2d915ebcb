//! CSV row sink

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::ScanError;
use crate::models::OutlierRecord;

/// Header written to every output table
pub const OUTPUT_HEADER: [&str; 6] = [
    "Stock-ID",
    "Timestamp",
    "Stock Price",
    "Mean",
    "Deviation",
    "Percent Deviation",
];

/// Write flagged outliers as a CSV table
///
/// Returns `Ok(false)` without touching the filesystem when there are
/// no records. The table is serialized in memory and written in a
/// single operation, so a failed write never leaves a partial file.
pub fn write_outliers(path: &Path, outliers: &[OutlierRecord]) -> Result<bool, ScanError> {
    if outliers.is_empty() {
        info!(file = %path.display(), "No outliers found, skipping output file");
        return Ok(false);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(OUTPUT_HEADER)?;

    for outlier in outliers {
        writer.write_record(&[
            outlier.stock_id.clone(),
            outlier.timestamp.clone(),
            outlier.price.to_string(),
            outlier.mean.to_string(),
            outlier.deviation.to_string(),
            outlier.percent_deviation.to_string(),
        ])?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    fs::write(path, buffer)?;

    info!(
        file = %path.display(),
        count = outliers.len(),
        "Outliers written"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> OutlierRecord {
        OutlierRecord {
            stock_id: "FLTR".to_string(),
            timestamp: "2023-09-01 09:14:00".to_string(),
            price: 17350.0,
            mean: 16300.0,
            deviation: 1050.0,
            percent_deviation: 131.25,
        }
    }

    #[test]
    fn test_zero_records_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_outliers.csv");

        let written = write_outliers(&path, &[]).unwrap();
        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flagged_outliers.csv");

        let written = write_outliers(&path, &[record()]).unwrap();
        assert!(written);

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Stock-ID,Timestamp,Stock Price,Mean,Deviation,Percent Deviation"
        );
        assert_eq!(
            lines.next().unwrap(),
            "FLTR,2023-09-01 09:14:00,17350,16300,1050,131.25"
        );
        assert!(lines.next().is_none());
    }
}
