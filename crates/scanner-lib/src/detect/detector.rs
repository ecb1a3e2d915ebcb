//! Price outlier detection
//!
//! Flags observations whose deviation from the window mean exceeds a
//! configurable number of standard deviations.

use crate::error::ScanError;
use crate::models::{Observation, OutlierRecord};

/// Default number of standard deviations for flagging
const DEFAULT_THRESHOLD: f64 = 2.0;

/// Flags observations exceeding a standard-deviation threshold
pub struct OutlierDetector {
    /// Number of standard deviations an absolute deviation must exceed
    pub threshold: f64,
}

impl OutlierDetector {
    /// Create a new detector with the given threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Detect outliers in a sampled window
    ///
    /// # Arguments
    /// * `window` - Ordered, non-empty slice of observations to analyze
    ///
    /// # Returns
    /// Flagged observations in input order, each annotated with the
    /// window statistics used for the decision. A zero-spread window
    /// flags nothing regardless of the threshold.
    ///
    /// # Errors
    /// * `ScanError::InsufficientData` on an empty window
    /// * `ScanError::InvalidObservation` when any price is non-finite
    pub fn detect(&self, window: &[Observation]) -> Result<Vec<OutlierRecord>, ScanError> {
        if window.is_empty() {
            return Err(ScanError::InsufficientData {
                rows: 0,
                required: 1,
            });
        }

        // Reject NaN/infinity before it can poison the statistics
        for obs in window {
            if !obs.price.is_finite() {
                return Err(ScanError::InvalidObservation {
                    stock_id: obs.stock_id.clone(),
                    timestamp: obs.timestamp.clone(),
                    value: obs.price.to_string(),
                });
            }
        }

        let stats = WindowStats::compute(window);

        // Zero spread: nothing can exceed any positive threshold
        if stats.std_dev < f64::EPSILON {
            return Ok(Vec::new());
        }

        let limit = self.threshold * stats.std_dev;
        let mut outliers = Vec::new();

        for obs in window {
            let deviation = obs.price - stats.mean;
            if deviation.abs() > limit {
                outliers.push(OutlierRecord {
                    stock_id: obs.stock_id.clone(),
                    timestamp: obs.timestamp.clone(),
                    price: obs.price,
                    mean: stats.mean,
                    deviation,
                    percent_deviation: (deviation / limit) * 100.0,
                });
            }
        }

        Ok(outliers)
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Population statistics for a sampled window
///
/// Computed once per window with divisor n, no Bessel correction.
#[derive(Debug, Clone, Copy)]
pub struct WindowStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl WindowStats {
    /// Compute population mean and standard deviation in a single pass
    ///
    /// Uses the direct `sum(x^2)/n - mean^2` form. The variance is
    /// clamped at zero before the square root to absorb floating-point
    /// cancellation on near-constant windows. The window must be
    /// non-empty.
    pub fn compute(window: &[Observation]) -> Self {
        let n = window.len() as f64;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;

        for obs in window {
            sum += obs.price;
            sum_sq += obs.price * obs.price;
        }

        let mean = sum / n;
        let variance = sum_sq / n - mean * mean;

        Self {
            mean,
            std_dev: variance.max(0.0).sqrt(),
        }
    }
}
