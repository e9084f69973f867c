//! Scheduler for walking the result pages of one search
//!
//! This module handles:
//! - Building the URL of each result page
//! - Handing out pages strictly in ascending order within `1..=pages`
//! - Picking a randomized courtesy delay before every request
//! - Deciding whether a page outcome continues or stops the run

use crate::config::{EmptyPageAction, SearchConfig};
use crate::state::PageOutcome;
use std::time::Duration;

/// Uniform random delay range applied before every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// Creates a delay range from seconds
    ///
    /// Bounds are clamped to be non-negative, ordered and representable;
    /// configuration validation rejects such input before it gets here.
    pub fn from_secs_f64(min: f64, max: f64) -> Self {
        let min = secs_to_duration(min);
        let max = secs_to_duration(max).max(min);
        Self { min, max }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draws a delay uniformly from `[min, max]`
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Duration {
        let spread = self.max - self.min;
        self.min + spread.mul_f64(rng.f64())
    }
}

/// Upper bound for a single delay; keeps sampling arithmetic in range
const MAX_DELAY: Duration = Duration::from_secs(u32::MAX as u64);

fn secs_to_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).map_or(MAX_DELAY, |delay| delay.min(MAX_DELAY))
}

/// Replaces spaces in the search term with hyphens
pub fn normalize_query(query: &str) -> String {
    query.replace(' ', "-")
}

/// Builds the URL of one result page
///
/// # Example
///
/// ```
/// use price_scout::crawler::build_page_url;
///
/// assert_eq!(
///     build_page_url("https://shop.example.com/s?k=", "memorias ram", 2),
///     "https://shop.example.com/s?k=memorias-ram&page=2"
/// );
/// ```
pub fn build_page_url(url_base: &str, query: &str, page: u32) -> String {
    format!("{}{}&page={}", url_base, normalize_query(query), page)
}

/// Whether to keep paging after a page outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDecision {
    Continue,
    Stop,
}

/// Maps page outcomes to continue/stop decisions
///
/// | Outcome | Decision |
/// |---------|----------|
/// | Items extracted | Continue |
/// | Transport error | Continue |
/// | Non-200 status | Stop |
/// | No item blocks | Stop (configurable) |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagePolicy {
    pub on_empty_page: EmptyPageAction,
}

impl PagePolicy {
    pub fn decide(&self, outcome: &PageOutcome) -> PageDecision {
        match outcome {
            PageOutcome::Extracted { .. } | PageOutcome::TransportError { .. } => {
                PageDecision::Continue
            }
            PageOutcome::HttpStatus { .. } => PageDecision::Stop,
            PageOutcome::NoContainers => match self.on_empty_page {
                EmptyPageAction::Stop => PageDecision::Stop,
                EmptyPageAction::Continue => PageDecision::Continue,
            },
        }
    }
}

/// A page ready to be requested
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPage {
    /// Page number, starting at 1
    pub page: u32,

    /// Fully templated request URL
    pub url: String,

    /// Delay to wait before sending the request
    pub delay: Duration,
}

/// Hands out the pages of one search in order
pub struct Scheduler {
    url_base: String,
    query: String,
    total_pages: u32,
    /// None once the range is used up or a stop was recorded
    next_page: Option<u32>,
    delay: DelayRange,
    policy: PagePolicy,
    rng: fastrand::Rng,
}

impl Scheduler {
    /// Creates a scheduler for the given search
    ///
    /// # Arguments
    ///
    /// * `config` - The search configuration
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            url_base: config.url_base.clone(),
            query: config.query.clone(),
            total_pages: config.pages,
            next_page: Some(1),
            delay: DelayRange::from_secs_f64(config.delay_min, config.delay_max),
            policy: PagePolicy {
                on_empty_page: config.on_empty_page,
            },
            rng: fastrand::Rng::new(),
        }
    }

    /// Replaces the random source (for reproducible delays)
    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = rng;
        self
    }

    /// Returns the next page to request, or None once the range is used up
    pub fn next_page(&mut self) -> Option<ScheduledPage> {
        let page = self.next_page.filter(|page| *page <= self.total_pages)?;
        self.next_page = page.checked_add(1);

        Some(ScheduledPage {
            page,
            url: build_page_url(&self.url_base, &self.query, page),
            delay: self.delay.sample(&mut self.rng),
        })
    }

    /// Applies the page policy; a stop decision ends the schedule
    pub fn record_outcome(&mut self, outcome: &PageOutcome) -> PageDecision {
        let decision = self.policy.decide(outcome);
        if decision == PageDecision::Stop {
            self.next_page = None;
        }
        decision
    }

    /// Total number of pages configured
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// The delay range in use
    pub fn delay_range(&self) -> DelayRange {
        self.delay
    }
}
