//! Scanner configuration

use anyhow::Result;
use serde::Deserialize;

use scanner_lib::pipeline::{ScanOptions, DEFAULT_MAX_FILES, DEFAULT_WINDOW_SIZE};

/// Scan defaults, loadable from PRICESCAN_-prefixed environment
/// variables
#[derive(Debug, Clone, Deserialize)]
pub struct ScanDefaults {
    /// Rows per sampled window
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Standard-deviation multiple for flagging
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Maximum files processed per scan
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Input file extension
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_threshold() -> f64 {
    2.0
}

fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

fn default_extension() -> String {
    "csv".to_string()
}

impl Default for ScanDefaults {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            threshold: default_threshold(),
            max_files: default_max_files(),
            extension: default_extension(),
        }
    }
}

impl ScanDefaults {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("PRICESCAN"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }

    /// Merge flag overrides into scan options
    pub fn to_options(
        &self,
        window_size: Option<usize>,
        threshold: Option<f64>,
        max_files: Option<usize>,
        extension: Option<String>,
    ) -> ScanOptions {
        ScanOptions {
            window_size: window_size.unwrap_or(self.window_size),
            threshold: threshold.unwrap_or(self.threshold),
            max_files: max_files.unwrap_or(self.max_files),
            extension: extension.unwrap_or_else(|| self.extension.clone()),
            ..ScanOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline() {
        let defaults = ScanDefaults::default();
        assert_eq!(defaults.window_size, 30);
        assert_eq!(defaults.max_files, 2);
        assert_eq!(defaults.extension, "csv");
    }

    #[test]
    fn test_flags_override_defaults() {
        let defaults = ScanDefaults::default();
        let options = defaults.to_options(Some(10), None, Some(5), None);

        assert_eq!(options.window_size, 10);
        assert_eq!(options.threshold, 2.0);
        assert_eq!(options.max_files, 5);
        assert_eq!(options.extension, "csv");
    }
}
