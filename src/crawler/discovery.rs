//! Sitemap root discovery
//!
//! Probes well-known sitemap locations under a base URL, plus the
//! `Sitemap:` lines of robots.txt. Discovery is best-effort: a probe that
//! fails to connect and one that answers 404 are both just skipped.

use crate::crawler::fetcher::Fetch;
use crate::url::resolve_against_base;

/// Probe path whose body is read for `Sitemap:` lines
const ROBOTS_PATH: &str = "/robots.txt";

/// Extracts sitemap URLs from robots.txt content
///
/// A line counts when its lowercased form starts with `sitemap:`. The value
/// after the first colon is trimmed; values without a scheme are resolved
/// against `base_url`. Empty values are skipped. Order is preserved.
///
/// # Example
///
/// ```
/// use sitemap_sweep::crawler::parse_robots_sitemaps;
///
/// let robots = "User-agent: *\nSitemap: /foo.xml\nSitemap: https://other.test/bar.xml\n";
/// assert_eq!(
///     parse_robots_sitemaps(robots, "https://example.com"),
///     vec!["https://example.com/foo.xml", "https://other.test/bar.xml"]
/// );
/// ```
pub fn parse_robots_sitemaps(content: &str, base_url: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| line.to_lowercase().starts_with("sitemap:"))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| resolve_against_base(base_url, value))
        .collect()
}

/// Discovers candidate root sitemaps for `base_url`
///
/// `probe_paths` are tried in order relative to `base_url`. A 2xx answer
/// accepts the probed URL itself as a root, except for robots.txt, whose
/// `Sitemap:` lines are used instead. Non-2xx answers and transport errors
/// are skipped. The result may be empty.
pub async fn discover_roots(
    base_url: &str,
    probe_paths: &[String],
    fetcher: &dyn Fetch,
) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    let mut roots = Vec::new();

    for path in probe_paths {
        let probe_url = format!("{}{}", base, path);

        let page = match fetcher.fetch(&probe_url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Error probing {}: {}", probe_url, e);
                continue;
            }
        };

        if !page.is_success() {
            tracing::debug!("Probe {} answered HTTP {}", probe_url, page.status_code);
            continue;
        }

        if path == ROBOTS_PATH {
            let found = parse_robots_sitemaps(&page.body, base);
            tracing::debug!("robots.txt listed {} sitemaps", found.len());
            roots.extend(found);
        } else {
            tracing::debug!("Found sitemap root {}", probe_url);
            roots.push(probe_url);
        }
    }

    tracing::info!("Discovered {} sitemap roots under {}", roots.len(), base);
    roots
}
