//! Statistics of a finished run
//!
//! This module summarizes a [`RunResult`] per page outcome and prints the
//! summary at the end of a run.

use crate::crawler::RunResult;
use crate::state::{PageOutcome, StopReason};
use std::collections::BTreeMap;

/// Run statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatistics {
    /// Pages that were actually requested
    pub pages_requested: usize,

    /// Count of pages by outcome label
    pub pages_by_outcome: BTreeMap<&'static str, usize>,

    /// Total records emitted
    pub total_records: usize,

    /// Item blocks seen across all pages, priced or not
    pub total_containers: usize,

    /// Records whose title selector did not match
    pub records_without_title: usize,

    /// Pages that contributed at least one record
    pub pages_with_records: usize,

    /// Pages skipped after a transport error
    pub pages_skipped: usize,

    /// Why the run ended
    pub stop_reason: StopReason,
}

impl RunStatistics {
    /// Computes statistics from a run result
    pub fn from_result(result: &RunResult) -> Self {
        let mut pages_by_outcome = BTreeMap::new();
        let mut total_containers = 0;
        let mut pages_with_records = 0;
        let mut pages_skipped = 0;

        for report in &result.pages {
            let outcome = &report.outcome;
            *pages_by_outcome.entry(outcome.as_str()).or_insert(0) += 1;
            if let PageOutcome::Extracted { containers, .. } = outcome {
                total_containers += containers;
            }
            if outcome.is_success() && outcome.record_count() > 0 {
                pages_with_records += 1;
            }
            if outcome.is_transient() {
                pages_skipped += 1;
            }
        }

        Self {
            pages_requested: result.pages.len(),
            pages_by_outcome,
            total_records: result.records.len(),
            total_containers,
            records_without_title: result.records.iter().filter(|r| r.title.is_none()).count(),
            pages_with_records,
            pages_skipped,
            stop_reason: result.stop_reason,
        }
    }

    /// Number of pages with the given outcome label
    pub fn pages_with(&self, outcome: &str) -> usize {
        self.pages_by_outcome.get(outcome).copied().unwrap_or(0)
    }

    /// Share of item blocks that produced a record, as a percentage
    pub fn priced_rate(&self) -> f64 {
        if self.total_containers == 0 {
            return 0.0;
        }
        (self.total_records as f64 / self.total_containers as f64) * 100.0
    }
}

/// Prints statistics to stdout in a human-readable format
pub fn print_statistics(stats: &RunStatistics) {
    println!("=== Price-Scout Run Statistics ===\n");

    println!("Pages requested: {}", stats.pages_requested);
    for (outcome, count) in &stats.pages_by_outcome {
        println!("  {:<16} {}", outcome, count);
    }
    println!("  With records: {}", stats.pages_with_records);
    println!("  Skipped: {}", stats.pages_skipped);

    println!("\nRecords: {}", stats.total_records);
    println!("  Item blocks seen: {}", stats.total_containers);
    println!("  Without title: {}", stats.records_without_title);
    println!(
        "  Priced rate: {:.1}% ({} / {} item blocks)",
        stats.priced_rate(),
        stats.total_records,
        stats.total_containers
    );

    if stats.stop_reason.is_early() {
        println!("\nStopped early: {}", stats.stop_reason);
    } else {
        println!("\nFinished: {}", stats.stop_reason);
    }
}
