//! Sitemap-Sweep main entry point
//!
//! This is the command-line interface for the Sitemap-Sweep SEO scraper.

use anyhow::Context;
use clap::Parser;
use sitemap_sweep::config::{load_config, validate, Config};
use sitemap_sweep::crawler::Coordinator;
use sitemap_sweep::output::print_sweep;
use sitemap_sweep::url::normalize_base_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemap-Sweep: a sitemap-driven SEO scraper
///
/// Finds a site's sitemaps, expands nested sitemap indexes, and fetches
/// every listed page, reporting its title, first heading, and meta
/// description.
#[derive(Parser, Debug)]
#[command(name = "sitemap-sweep")]
#[command(version)]
#[command(about = "A sitemap-driven SEO scraper", long_about = None)]
struct Cli {
    /// Base URL of the site to find and scrape the sitemap of
    #[arg(long, visible_alias = "baseurl", default_value = "https://example.com")]
    base_url: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of page fetches in flight (overrides config)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,

    /// Seed for user-agent rotation (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let base_url = normalize_base_url(&cli.base_url)
        .with_context(|| format!("Invalid base URL: {}", cli.base_url))?;

    let coordinator = Coordinator::new(&config).context("Failed to build HTTP client")?;
    let report = print_sweep(&coordinator, &base_url, &mut std::io::stdout())
        .await
        .context("Failed to write output")?;

    tracing::info!(
        "Finished {}: {} records from {} roots",
        report.base_url,
        report.records.len(),
        report.roots.len()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_sweep=info,warn"),
            1 => EnvFilter::new("sitemap_sweep=debug,info"),
            2 => EnvFilter::new("sitemap_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file when given and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        config.crawler.concurrency = concurrency;
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
    }
    if let Some(seed) = cli.seed {
        config.user_agent.seed = Some(seed);
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
