//! Sitemap expansion
//!
//! Starting from one root sitemap, every sitemap document is fetched in its
//! own task, its `<loc>` entries are classified, nested sitemaps are fed
//! back into the worklist and leaf pages are accumulated. Depth and
//! branching factor are unknown up front; the worklist detects when the
//! whole tree has been explored.

use crate::crawler::classifier::classify;
use crate::crawler::fetcher::Fetch;
use crate::crawler::worklist::Worklist;
use crate::{ParseError, SweepError};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A URL scheduled for fetching, with the sitemap it was found in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrawlTarget {
    /// The URL to fetch
    pub url: String,

    /// Sitemap that listed this URL (`None` for roots)
    pub source: Option<String>,
}

impl CrawlTarget {
    /// A target with no discovery context
    pub fn root(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: None,
        }
    }

    /// A target discovered inside the sitemap at `source`
    pub fn child(url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: Some(source.into()),
        }
    }

    /// Empty URLs are never scheduled
    pub fn is_schedulable(&self) -> bool {
        !self.url.is_empty()
    }
}

impl From<&str> for CrawlTarget {
    fn from(url: &str) -> Self {
        Self::root(url)
    }
}

impl From<String> for CrawlTarget {
    fn from(url: String) -> Self {
        Self::root(url)
    }
}

impl fmt::Display for CrawlTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{} (from {})", self.url, source),
            None => write!(f, "{}", self.url),
        }
    }
}

/// Extracts the text of every `<loc>` element, in document order
///
/// Values are trimmed and empty entries skipped. The document is parsed
/// leniently, so malformed XML still yields whatever `<loc>` elements can
/// be recovered.
pub fn extract_locs(url: &str, body: &str) -> Result<Vec<String>, ParseError> {
    let selector = Selector::parse("loc").map_err(|e| ParseError::Sitemap {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let document = Html::parse_document(body);
    let locs = document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|loc| !loc.is_empty())
        .collect();

    Ok(locs)
}

/// Fetches one sitemap and returns its `<loc>` entries
///
/// A non-2xx response yields no entries.
async fn fetch_locs(fetcher: &dyn Fetch, target: &CrawlTarget) -> Result<Vec<String>, SweepError> {
    let page = fetcher.fetch(&target.url).await?;

    if !page.is_success() {
        tracing::warn!("Skipping sitemap {}: HTTP {}", target, page.status_code);
        return Ok(Vec::new());
    }

    Ok(extract_locs(&target.url, &page.body)?)
}

/// Expands the sitemap tree under `root` into its leaf page targets
///
/// Each sitemap URL is fetched at most once per call, so cyclic sitemap
/// references terminate. Failures are logged and contribute nothing.
/// The order of the returned targets is unspecified.
pub async fn expand_sitemaps(root: &str, fetcher: Arc<dyn Fetch>) -> Vec<CrawlTarget> {
    let pages: Arc<Mutex<Vec<CrawlTarget>>> = Arc::new(Mutex::new(Vec::new()));
    let mut scheduled: HashSet<String> = HashSet::new();

    let launched = Worklist::new(vec![CrawlTarget::root(root)])
        .run(
            |target: &CrawlTarget| target.is_schedulable() && scheduled.insert(target.url.clone()),
            |target, reporter| {
                let fetcher = Arc::clone(&fetcher);
                let pages = Arc::clone(&pages);

                async move {
                    let locs = match fetch_locs(fetcher.as_ref(), &target).await {
                        Ok(locs) => locs,
                        Err(e) => {
                            tracing::warn!("Failed to expand sitemap {}: {}", target, e);
                            reporter.done();
                            return;
                        }
                    };

                    let (sitemaps, leaf_pages) = classify(locs);
                    for sitemap in &sitemaps {
                        tracing::info!("Found sitemap {}", sitemap);
                    }
                    tracing::debug!(
                        "Sitemap {} listed {} sitemaps and {} pages",
                        target.url,
                        sitemaps.len(),
                        leaf_pages.len()
                    );

                    {
                        let mut pages = pages.lock().unwrap_or_else(|e| e.into_inner());
                        pages.extend(
                            leaf_pages
                                .into_iter()
                                .map(|page| CrawlTarget::child(page, target.url.as_str())),
                        );
                    }

                    reporter.report(
                        sitemaps
                            .into_iter()
                            .map(|sitemap| CrawlTarget::child(sitemap, target.url.as_str()))
                            .collect(),
                    );
                }
            },
        )
        .await;

    let pages = std::mem::take(&mut *pages.lock().unwrap_or_else(|e| e.into_inner()));
    tracing::info!(
        "Expanded {} sitemaps under {}: {} pages",
        launched,
        root,
        pages.len()
    );
    pages
}
