//! Price-Scout: a selector-driven product and price extractor
//!
//! This crate walks the paginated search results of an arbitrary e-commerce site,
//! locates repeated item blocks with a declarative tag/attribute pattern, pulls
//! named fields out of each block and persists the records as CSV rows.

pub mod config;
pub mod crawler;
pub mod output;
pub mod selector;
pub mod state;

use thiserror::Error;

/// Main error type for Price-Scout operations
///
/// Page-level failures (bad status, empty pages, transport errors) never surface
/// here; the scheduler absorbs them. This covers setup and persistence.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{field}': {message}")]
    InvalidSelector { field: String, message: String },
}

/// Result type alias for Price-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_scrape, ExtractedRecord, RunResult};
pub use selector::{SelectorSpec, SelectorTree};
pub use state::{PageOutcome, StopReason};
