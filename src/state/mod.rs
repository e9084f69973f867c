//! State module for tracking the progress of a run
//!
//! # Components
//!
//! - `PageOutcome`: what happened to a single result page
//! - `StopReason`: why the page loop ended

mod page_outcome;

// Re-export main types
pub use page_outcome::{PageOutcome, PageReport, StopReason};
