//! Scanner error types

use thiserror::Error;

/// Errors produced while scanning a single input file
///
/// None of these are fatal to a directory scan: the pipeline logs the
/// failing file and continues with the remaining ones.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not enough rows for sampling: have {rows}, need {required}")]
    InsufficientData { rows: usize, required: usize },

    #[error("invalid price {value:?} for stock {stock_id} at {timestamp}")]
    InvalidObservation {
        stock_id: String,
        timestamp: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
