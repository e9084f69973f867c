//! Run coordinator - the page loop
//!
//! This module contains the loop that ties a run together:
//! - Asking the scheduler for the next page and waiting out its delay
//! - Fetching the page
//! - Handing the body to the field extractor
//! - Accumulating records and applying the continue/stop policy
//!
//! Pages are processed strictly one after another.

use crate::config::Config;
use crate::crawler::parser::parse_page;
use crate::crawler::record::{ExtractedRecord, RunResult};
use crate::crawler::scheduler::{PageDecision, ScheduledPage, Scheduler};
use crate::crawler::{build_http_client, fetch_page, FetchResult};
use crate::state::{PageOutcome, PageReport, StopReason};
use crate::ScoutError;
use chrono::Local;
use reqwest::Client;

/// Main run coordinator structure
pub struct Coordinator {
    config: Config,
    scheduler: Scheduler,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScoutError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, ScoutError> {
        let client = build_http_client(&config.request)?;
        let scheduler = Scheduler::new(&config.search);

        Ok(Self {
            config,
            scheduler,
            client,
        })
    }

    /// Replaces the scheduler (e.g. one with a seeded random source)
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Runs the page loop to completion
    ///
    /// Page-level failures never escape: bad statuses and empty pages end the
    /// loop, transport errors skip the page. The records gathered so far are
    /// always returned.
    pub async fn run(&mut self) -> RunResult {
        let total = self.scheduler.total_pages();
        let mut records = Vec::new();
        let mut pages = Vec::new();
        let mut stop_reason = StopReason::Exhausted;

        tracing::info!(
            "Searching '{}' over {} pages",
            self.config.search.query,
            total
        );

        while let Some(scheduled) = self.scheduler.next_page() {
            tracing::info!("Processing page {}/{}", scheduled.page, total);
            tracing::debug!("URL: {}", scheduled.url);

            let outcome = self.process_page(&scheduled, &mut records).await;

            match &outcome {
                PageOutcome::Extracted { records: count, .. } => {
                    tracing::info!("Extracted {} products from page {}", count, scheduled.page);
                }
                PageOutcome::HttpStatus { status_code } => {
                    tracing::warn!(
                        "Request for page {} failed with status {}",
                        scheduled.page,
                        status_code
                    );
                }
                PageOutcome::NoContainers => {
                    tracing::warn!("No products found on page {}", scheduled.page);
                }
                PageOutcome::TransportError { error } => {
                    tracing::error!("Error processing page {}: {}", scheduled.page, error);
                }
            }

            let decision = self.scheduler.record_outcome(&outcome);
            if decision == PageDecision::Stop {
                stop_reason = match outcome {
                    PageOutcome::HttpStatus { status_code } => StopReason::HttpStatus {
                        page: scheduled.page,
                        status_code,
                    },
                    _ => StopReason::NoContainers {
                        page: scheduled.page,
                    },
                };
                tracing::info!("Stopping run: {}", stop_reason);
            }

            pages.push(PageReport {
                page: scheduled.page,
                url: scheduled.url,
                outcome,
            });
        }

        tracing::info!(
            "Run finished: {} records from {} pages ({})",
            records.len(),
            pages.len(),
            stop_reason
        );

        RunResult {
            records,
            pages,
            stop_reason,
        }
    }

    /// Processes a single page
    ///
    /// 1. Waits the scheduled delay
    /// 2. Fetches the page
    /// 3. Extracts item blocks and appends the priced ones to `records`
    async fn process_page(
        &self,
        scheduled: &ScheduledPage,
        records: &mut Vec<ExtractedRecord>,
    ) -> PageOutcome {
        tracing::debug!(
            "Waiting {:.2} seconds before requesting page {}",
            scheduled.delay.as_secs_f64(),
            scheduled.page
        );
        tokio::time::sleep(scheduled.delay).await;

        let body = match fetch_page(&self.client, &scheduled.url).await {
            FetchResult::Success { body } => body,
            FetchResult::HttpError { status_code } => {
                return PageOutcome::HttpStatus { status_code };
            }
            FetchResult::NetworkError { error } => {
                return PageOutcome::TransportError { error };
            }
        };

        let parsed = parse_page(&body, &self.config.selectors);
        let containers = parsed.container_count();
        if containers == 0 {
            return PageOutcome::NoContainers;
        }

        let extraction_date = Local::now().date_naive();
        let before = records.len();
        records.extend(parsed.items.into_iter().filter_map(|fields| {
            ExtractedRecord::from_fields(fields, extraction_date, scheduled.page)
        }));

        PageOutcome::Extracted {
            containers,
            records: records.len() - before,
        }
    }
}

/// Runs a complete scrape for the given configuration
///
/// # Returns
///
/// * `Ok(RunResult)` - The run completed (possibly stopping early)
/// * `Err(ScoutError)` - The run could not be set up
pub async fn run_scrape(config: Config) -> Result<RunResult, ScoutError> {
    let mut coordinator = Coordinator::new(config)?;
    Ok(coordinator.run().await)
}
