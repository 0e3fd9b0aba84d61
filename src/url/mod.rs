//! URL handling for Sitemap-Sweep
//!
//! Base URLs are reduced to their origin (`scheme://host[:port]`) so probe
//! paths and robots.txt sitemap paths can be appended verbatim.

use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes a user-supplied base URL to its origin
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Prefix `https://` when the input does not start with `http`
/// 3. Parse the URL; reject if malformed, non-HTTP(S), or host-less
/// 4. Drop path, query, and fragment; keep scheme, host, and explicit port
///
/// # Examples
///
/// ```
/// use sitemap_sweep::url::normalize_base_url;
///
/// let base = normalize_base_url("example.com/blog/?page=2").unwrap();
/// assert_eq!(base, "https://example.com");
/// ```
pub fn normalize_base_url(input: &str) -> UrlResult<String> {
    let trimmed = input.trim();
    let with_scheme = if trimmed.starts_with("http") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(url.origin().ascii_serialization())
}

/// Resolves a sitemap reference against a base origin
///
/// Values that are already http(s) URLs are returned unchanged; anything
/// else is appended to the base, inserting a `/` separator when missing.
/// A bare `host:port/path` has no scheme and counts as relative.
pub fn resolve_against_base(base_url: &str, value: &str) -> String {
    if has_web_scheme(value) {
        return value.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if value.starts_with('/') {
        format!("{}{}", base, value)
    } else {
        format!("{}/{}", base, value)
    }
}

fn has_web_scheme(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
