//! Scanner library for stock price outlier detection
//!
//! This crate provides the core functionality for:
//! - CSV row parsing and output writing
//! - Input file discovery
//! - Windowed sampling with injectable randomness
//! - Mean/standard-deviation outlier detection
//! - The per-file scan pipeline

pub mod detect;
pub mod error;
pub mod io;
pub mod models;
pub mod observability;
pub mod pipeline;

pub use detect::{sample, OutlierDetector, RandomSource, SeededRandom, SystemRandom, WindowStats};
pub use error::ScanError;
pub use models::*;
pub use observability::ScanLogger;
pub use pipeline::{FileReport, ScanOptions, ScanRunner, ScanSummary};
