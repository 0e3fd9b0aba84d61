//! Integration tests for Sitemap-Sweep
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! real HTTP fetcher, root discovery, and the full sweep end-to-end.

mod crawl_tests;
mod discovery_tests;
mod fetcher_tests;
