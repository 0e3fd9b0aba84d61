//! Configuration module for Sitemap-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so running without a file is equivalent to
//! running with an empty one.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Concurrency budget: {}", config.crawler.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, UserAgentConfig, DEFAULT_CONCURRENCY, DEFAULT_PROBE_PATHS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENTS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
