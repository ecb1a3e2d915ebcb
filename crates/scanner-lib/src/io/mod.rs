//! CSV input and output
//!
//! Row source, row sink, and input-file discovery. Rows are read in
//! column order (stock id, timestamp, price) without a header row,
//! matching the upstream data files.

mod discovery;
mod reader;
mod writer;

pub use discovery::{discover_input_files, output_path};
pub use reader::read_observations;
pub use writer::{write_outliers, OUTPUT_HEADER};
