//! Bounded page scraping
//!
//! Every leaf page gets its own task on the shared worklist, but only
//! `concurrency` of them may have a fetch in flight at once. The token is
//! held for the fetch alone and released before parsing, on success and
//! failure alike.

use crate::crawler::fetcher::Fetch;
use crate::crawler::parser::{PageParser, PageRecord};
use crate::crawler::sitemap::CrawlTarget;
use crate::crawler::worklist::Worklist;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Fetches and parses every target with at most `concurrency` fetches in flight
///
/// A `concurrency` of zero is treated as one. Failed fetches and parse
/// errors are logged and contribute no record. The order of the returned
/// records is unspecified.
pub async fn scrape_pages(
    targets: Vec<CrawlTarget>,
    fetcher: Arc<dyn Fetch>,
    parser: Arc<dyn PageParser>,
    concurrency: usize,
) -> Vec<PageRecord> {
    let tokens = Arc::new(Semaphore::new(concurrency.max(1)));
    let records: Arc<Mutex<Vec<PageRecord>>> = Arc::new(Mutex::new(Vec::new()));

    let launched = Worklist::new(targets)
        .run(CrawlTarget::is_schedulable, |target, reporter| {
            let fetcher = Arc::clone(&fetcher);
            let parser = Arc::clone(&parser);
            let tokens = Arc::clone(&tokens);
            let records = Arc::clone(&records);

            async move {
                tracing::debug!("Requesting URL: {}", target.url);

                let fetched = {
                    let _token = match tokens.acquire().await {
                        Ok(token) => token,
                        Err(e) => {
                            tracing::error!("Concurrency budget unavailable for {}: {}", target, e);
                            reporter.done();
                            return;
                        }
                    };
                    fetcher.fetch(&target.url).await
                };

                let page = match fetched {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::warn!("Failed to fetch {}: {}", target, e);
                        reporter.done();
                        return;
                    }
                };

                match parser.parse(&page) {
                    Ok(record) => {
                        let mut records = records.lock().unwrap_or_else(|e| e.into_inner());
                        records.push(record);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", target, e);
                    }
                }

                reporter.done();
            }
        })
        .await;

    let records = std::mem::take(&mut *records.lock().unwrap_or_else(|e| e.into_inner()));
    tracing::info!("Scraped {} of {} pages", records.len(), launched);
    records
}
