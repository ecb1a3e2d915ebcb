//! Core data models for the scanner

use serde::{Deserialize, Serialize};

/// A single price record parsed from an input file
///
/// Immutable once parsed. Field order matches the input column order:
/// stock id, timestamp, price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub stock_id: String,
    pub timestamp: String,
    pub price: f64,
}

/// An observation flagged as an outlier, annotated with the window
/// statistics used to make the decision
///
/// `deviation` is `price - mean`; `percent_deviation` expresses the
/// deviation as a percentage of the flagging threshold, not of the mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub stock_id: String,
    pub timestamp: String,
    pub price: f64,
    pub mean: f64,
    pub deviation: f64,
    pub percent_deviation: f64,
}
