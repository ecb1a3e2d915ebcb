//! Price Outlier Scanner CLI
//!
//! A command-line tool for scanning directories of stock price CSV
//! files and flagging statistical outliers.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Price Outlier Scanner CLI
#[derive(Parser)]
#[command(name = "pricescan")]
#[command(author, version, about = "CLI for the price outlier scanner", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory of price files and write outlier tables
    Scan {
        /// Directory containing input files
        directory: PathBuf,

        /// Rows per sampled window
        #[arg(long)]
        window_size: Option<usize>,

        /// Standard-deviation multiple for flagging
        #[arg(long)]
        threshold: Option<f64>,

        /// Maximum number of files to process
        #[arg(long)]
        max_files: Option<usize>,

        /// Input file extension
        #[arg(long)]
        extension: Option<String>,

        /// Seed for deterministic window selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Analyze a single price file without writing an output table
    Detect {
        /// Input file
        file: PathBuf,

        /// Rows per sampled window
        #[arg(long)]
        window_size: Option<usize>,

        /// Standard-deviation multiple for flagging
        #[arg(long)]
        threshold: Option<f64>,

        /// Seed for deterministic window selection
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with an env-filter override
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_target(false))
        .init();

    // Environment-provided defaults; flags override per invocation
    let defaults = config::ScanDefaults::load()?;

    match cli.command {
        Commands::Scan {
            directory,
            window_size,
            threshold,
            max_files,
            extension,
            seed,
        } => {
            let options = defaults.to_options(window_size, threshold, max_files, extension);
            commands::scan::run_scan(&directory, options, seed, cli.format)
        }
        Commands::Detect {
            file,
            window_size,
            threshold,
            seed,
        } => commands::detect::run_detect(
            &file,
            window_size.unwrap_or(defaults.window_size),
            threshold.unwrap_or(defaults.threshold),
            seed,
            cli.format,
        ),
    }
}
