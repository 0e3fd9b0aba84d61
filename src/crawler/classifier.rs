//! Sitemap vs. page classification
//!
//! A URL is treated as a nested sitemap when its text contains `xml`
//! (case-sensitive). This is a naming heuristic only: a content page whose
//! URL happens to contain `xml` (e.g. `/guides/xml-basics`) is classified
//! as a sitemap, fetched as one, and contributes whatever `<loc>` entries
//! it happens to contain. No content-type or body sniffing is done.

/// Substring that marks a URL as a nested sitemap
const SITEMAP_MARKER: &str = "xml";

/// Returns true if `url` would be classified as a nested sitemap
pub fn is_sitemap_url(url: &str) -> bool {
    url.contains(SITEMAP_MARKER)
}

/// Partitions URLs into `(sitemaps, pages)`
///
/// Input order is preserved within each partition, and every input URL
/// lands in exactly one of them.
///
/// # Example
///
/// ```
/// use sitemap_sweep::crawler::classify;
///
/// let (sitemaps, pages) = classify(vec![
///     "https://example.com/post-sitemap.xml".to_string(),
///     "https://example.com/about".to_string(),
/// ]);
/// assert_eq!(sitemaps, vec!["https://example.com/post-sitemap.xml"]);
/// assert_eq!(pages, vec!["https://example.com/about"]);
/// ```
pub fn classify(urls: Vec<String>) -> (Vec<String>, Vec<String>) {
    urls.into_iter().partition(|url| is_sitemap_url(url))
}
