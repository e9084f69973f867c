//! Configuration module for Price-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use price_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Will walk {} result pages", config.search.pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, EmptyPageAction, OutputConfig, RequestConfig, SearchConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
