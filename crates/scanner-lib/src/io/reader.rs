//! CSV row source

use std::path::Path;

use tracing::warn;

use crate::error::ScanError;
use crate::models::Observation;

/// Fields a row must carry: stock id, timestamp, price
const MIN_FIELDS: usize = 3;

/// Read observations from a headerless CSV file
///
/// Rows with fewer than three fields are skipped with a per-row
/// diagnostic; fields beyond the first three are ignored. A price that
/// does not parse as a finite number fails the whole file, so a
/// poisoned value can never reach the statistics.
pub fn read_observations(path: &Path) -> Result<Vec<Observation>, ScanError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut observations = Vec::new();

    for record in reader.records() {
        let record = record?;

        if record.len() < MIN_FIELDS {
            warn!(
                file = %path.display(),
                row = ?record,
                "Skipping malformed row"
            );
            continue;
        }

        let stock_id = record[0].to_string();
        let timestamp = record[1].to_string();
        let raw_price = &record[2];

        let price = raw_price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ScanError::InvalidObservation {
                stock_id: stock_id.clone(),
                timestamp: timestamp.clone(),
                value: raw_price.to_string(),
            })?;

        observations.push(Observation {
            stock_id,
            timestamp,
            price,
        });
    }

    Ok(observations)
}
