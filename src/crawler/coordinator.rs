//! Crawl coordinator - end-to-end orchestration
//!
//! Wires the stages together: root discovery, then for each root the
//! sitemap expansion followed by bounded page scraping. Results from all
//! roots are concatenated.

use crate::config::Config;
use crate::crawler::discovery::discover_roots;
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::parser::{PageParser, PageRecord, SeoParser};
use crate::crawler::pages::scrape_pages;
use crate::crawler::sitemap::expand_sitemaps;
use crate::SweepError;
use std::sync::Arc;

/// Outcome of a full sweep over one site
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Normalized base URL that was swept
    pub base_url: String,

    /// Sitemap roots found by discovery, in probe order
    pub roots: Vec<String>,

    /// One record per successfully scraped page, in no particular order
    pub records: Vec<PageRecord>,
}

/// Stage transitions reported while a sweep runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepProgress<'a> {
    /// Root discovery is starting
    Discovering { base_url: &'a str },

    /// Root discovery finished; `roots` may be empty
    RootsDiscovered { roots: &'a [String] },

    /// Expansion and scraping of one root is starting
    ScrapingRoot { root: &'a str },
}

/// Main crawler coordinator structure
pub struct Coordinator {
    fetcher: Arc<dyn Fetch>,
    parser: Arc<dyn PageParser>,
    concurrency: usize,
    probe_paths: Vec<String>,
}

impl Coordinator {
    /// Creates a coordinator using the HTTP fetcher and default SEO parser
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(SweepError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, SweepError> {
        let fetcher = HttpFetcher::from_config(config)?;
        Ok(Self::with_components(
            Arc::new(fetcher),
            Arc::new(SeoParser),
            config,
        ))
    }

    /// Creates a coordinator with caller-supplied fetcher and parser
    pub fn with_components(
        fetcher: Arc<dyn Fetch>,
        parser: Arc<dyn PageParser>,
        config: &Config,
    ) -> Self {
        Self {
            fetcher,
            parser,
            concurrency: config.crawler.concurrency,
            probe_paths: config.crawler.probe_paths.clone(),
        }
    }

    /// Concurrency budget applied to page fetches
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Finds candidate sitemap roots under `base_url`
    pub async fn discover(&self, base_url: &str) -> Vec<String> {
        discover_roots(base_url, &self.probe_paths, self.fetcher.as_ref()).await
    }

    /// Expands one root sitemap and scrapes every page it leads to
    pub async fn scrape_sitemap(&self, root: &str) -> Vec<PageRecord> {
        let pages = expand_sitemaps(root, Arc::clone(&self.fetcher)).await;
        scrape_pages(
            pages,
            Arc::clone(&self.fetcher),
            Arc::clone(&self.parser),
            self.concurrency,
        )
        .await
    }

    /// Runs discovery and scrapes every discovered root in turn
    pub async fn run(&self, base_url: &str) -> CrawlReport {
        self.run_with_progress(base_url, |_| {}).await
    }

    /// Like [`Coordinator::run`], calling `progress` at each stage transition
    pub async fn run_with_progress<F>(&self, base_url: &str, mut progress: F) -> CrawlReport
    where
        F: FnMut(SweepProgress<'_>),
    {
        progress(SweepProgress::Discovering { base_url });
        let roots = self.discover(base_url).await;
        progress(SweepProgress::RootsDiscovered { roots: &roots });

        let mut records = Vec::new();
        for root in &roots {
            tracing::info!("Scraping sitemap: {}", root);
            progress(SweepProgress::ScrapingRoot { root });
            records.extend(self.scrape_sitemap(root).await);
        }

        tracing::info!(
            "Sweep of {} complete: {} roots, {} records",
            base_url,
            roots.len(),
            records.len()
        );

        CrawlReport {
            base_url: base_url.to_string(),
            roots,
            records,
        }
    }
}

/// Runs a complete sweep of `base_url` with the given configuration
///
/// The base URL is normalized to its origin first.
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Sweep finished (possibly with no results)
/// * `Err(SweepError)` - Invalid base URL or HTTP client setup failure
pub async fn run_sweep(config: &Config, base_url: &str) -> crate::Result<CrawlReport> {
    let base_url = crate::url::normalize_base_url(base_url)?;
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run(&base_url).await)
}
