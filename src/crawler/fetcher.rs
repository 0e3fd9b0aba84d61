//! HTTP fetcher implementation
//!
//! This module handles all outbound requests for the crawler:
//! - Building the HTTP client with the configured timeout
//! - Rotating the User-Agent header per request from a fixed pool
//! - Classifying transport failures
//!
//! Non-2xx responses are returned as ordinary [`FetchedPage`]s; deciding
//! whether a status is usable is the caller's job. Nothing is retried here.

use crate::config::Config;
use crate::FetchError;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::sync::Mutex;
use std::time::Duration;

/// A fully-read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Response body
    pub body: String,
}

impl FetchedPage {
    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// A single outbound request
///
/// Implemented by [`HttpFetcher`] for real traffic; tests substitute stubs.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issues one GET request for `url`
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Pool of client identities with a single seeded generator
pub struct UserAgentPool {
    agents: Vec<String>,
    rng: Mutex<StdRng>,
}

impl UserAgentPool {
    /// Creates a pool seeded from `seed`, or from OS entropy when `None`
    pub fn new(agents: Vec<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            agents,
            rng: Mutex::new(rng),
        }
    }

    /// Picks the identity for the next request
    ///
    /// Returns `None` only for an empty pool, in which case reqwest's
    /// default User-Agent is used.
    pub fn pick(&self) -> Option<&str> {
        if self.agents.is_empty() {
            return None;
        }

        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(0..self.agents.len())
        };
        Some(self.agents[index].as_str())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Builds an HTTP client with the given timeout
///
/// No cookie store is configured, so no session state survives between
/// requests.
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by reqwest
pub struct HttpFetcher {
    client: Client,
    agents: UserAgentPool,
}

impl HttpFetcher {
    /// Creates a fetcher from an existing client and identity pool
    pub fn new(client: Client, agents: UserAgentPool) -> Self {
        Self { client, agents }
    }

    /// Creates a fetcher from configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sitemap_sweep::config::Config;
    /// use sitemap_sweep::crawler::HttpFetcher;
    ///
    /// let fetcher = HttpFetcher::from_config(&Config::default()).unwrap();
    /// ```
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config.crawler.request_timeout())?;
        let agents = UserAgentPool::new(config.user_agent.pool.clone(), config.user_agent.seed);
        Ok(Self::new(client, agents))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut request = self.client.get(url);
        if let Some(agent) = self.agents.pick() {
            request = request.header(USER_AGENT, agent);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();

        let body = response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })?;

        tracing::trace!("Fetched {} ({}), {} bytes", final_url, status_code, body.len());

        Ok(FetchedPage {
            url: final_url,
            status_code,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn agents(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Agent/{}", i)).collect()
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[test]
    fn test_from_default_config() {
        assert!(HttpFetcher::from_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_pick_is_reproducible_with_seed() {
        let a = UserAgentPool::new(agents(6), Some(42));
        let b = UserAgentPool::new(agents(6), Some(42));

        let first: Vec<String> = (0..20).map(|_| a.pick().unwrap().to_string()).collect();
        let second: Vec<String> = (0..20).map(|_| b.pick().unwrap().to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_varies_identity() {
        let pool = UserAgentPool::new(agents(6), Some(1));
        let seen: HashSet<&str> = (0..200).filter_map(|_| pool.pick()).collect();
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_pick_empty_pool() {
        let pool = UserAgentPool::new(Vec::new(), None);
        assert!(pool.is_empty());
        assert_eq!(pool.pick(), None);
    }

    #[test]
    fn test_is_success() {
        let page = |status_code| FetchedPage {
            url: "https://example.com/".to_string(),
            status_code,
            body: String::new(),
        };
        assert!(page(200).is_success());
        assert!(page(204).is_success());
        assert!(!page(301).is_success());
        assert!(!page(404).is_success());
    }
}
