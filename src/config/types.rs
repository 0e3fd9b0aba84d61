use serde::Deserialize;
use std::time::Duration;

/// Default number of page fetches allowed in flight at once
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Well-known locations probed for sitemap roots, in probe order
pub const DEFAULT_PROBE_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap1.xml",
    "/robots.txt",
];

/// Browser identities rotated across requests
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36",
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) AppleWebKit/604.1.38 (KHTML, like Gecko) Version/11.0 Safari/604.1.38",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:56.0) Gecko/20100101 Firefox/56.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13) AppleWebKit/604.1.38 (KHTML, like Gecko) Version/11.0 Safari/604.1.38",
];

/// Main configuration structure for Sitemap-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Timeout applied to every request (seconds)
    #[serde(default = "default_timeout", rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Paths probed relative to the base URL when looking for sitemap roots
    #[serde(default = "default_probe_paths", rename = "probe-paths")]
    pub probe_paths: Vec<String>,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            request_timeout_secs: default_timeout(),
            probe_paths: default_probe_paths(),
        }
    }
}

/// Client identity configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// User-Agent strings picked from at random per request
    #[serde(default = "default_pool")]
    pub pool: Vec<String>,

    /// Fixed seed for the rotation generator; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            pool: default_pool(),
            seed: None,
        }
    }
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_probe_paths() -> Vec<String> {
    DEFAULT_PROBE_PATHS.iter().map(|p| p.to_string()).collect()
}

fn default_pool() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|ua| ua.to_string()).collect()
}
