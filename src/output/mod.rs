//! Output module for persisting and summarizing run results
//!
//! This module handles:
//! - Writing extracted records as CSV rows
//! - Computing and printing run statistics

mod csv_writer;
pub mod stats;

pub use csv_writer::{csv_header, save_to_csv, CSV_HEADER};
pub use stats::{print_statistics, RunStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
