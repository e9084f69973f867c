//! Crawler module for walking result pages and extracting records
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with a fixed browser header set
//! - Field extraction from item blocks
//! - Page scheduling, courtesy delays and the stop policy
//! - Overall run coordination

mod coordinator;
mod fetcher;
mod parser;
mod record;
mod scheduler;

pub use coordinator::{run_scrape, Coordinator};
pub use fetcher::{
    build_http_client, decode_body, fetch_page, FetchResult, BROWSER_USER_AGENT,
};
pub use parser::{
    extract_container, find_containers, parse_page, resolve_field, ExtractedFields, ParsedPage,
};
pub use record::{page_label, ExtractedRecord, RunResult};
pub use scheduler::{
    build_page_url, normalize_query, DelayRange, PageDecision, PagePolicy, ScheduledPage,
    Scheduler,
};
