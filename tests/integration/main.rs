//! Integration tests for Price-Scout
//!
//! These tests use wiremock to serve result pages and check the page loop
//! end-to-end: request counts, stop conditions and extracted records.

mod scrape_tests;
