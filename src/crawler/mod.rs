//! Crawler module for sitemap discovery and page scraping
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with rotating client identities
//! - Root sitemap discovery from well-known paths and robots.txt
//! - Recursive sitemap expansion on a termination-detecting worklist
//! - Bounded-concurrency page scraping and metadata extraction

mod classifier;
mod coordinator;
mod discovery;
mod fetcher;
mod parser;
mod pages;
mod sitemap;
mod worklist;

pub use classifier::{classify, is_sitemap_url};
pub use coordinator::{run_sweep, Coordinator, CrawlReport, SweepProgress};
pub use discovery::{discover_roots, parse_robots_sitemaps};
pub use fetcher::{build_http_client, Fetch, FetchedPage, HttpFetcher, UserAgentPool};
pub use parser::{PageParser, PageRecord, SeoParser};
pub use pages::scrape_pages;
pub use sitemap::{expand_sitemaps, extract_locs, CrawlTarget};
pub use worklist::{Reporter, Worklist};
