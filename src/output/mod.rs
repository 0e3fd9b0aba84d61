//! Output module for Sitemap-Sweep
//!
//! Renders sweep results as plain text for the terminal. There is no
//! machine-readable format; every writer takes an `io::Write` so output can
//! be captured in tests.

mod stats;

pub use stats::{write_statistics, CrawlStatistics};

use crate::crawler::{Coordinator, CrawlReport, PageRecord, SweepProgress};
use std::io::{self, Write};

/// Writes the discovered sitemap roots, or a notice when there are none
pub fn write_roots<W: Write>(out: &mut W, roots: &[String]) -> io::Result<()> {
    if roots.is_empty() {
        writeln!(out, "No sitemaps found.")?;
        return Ok(());
    }

    writeln!(out, "Found {} sitemap root(s):", roots.len())?;
    for root in roots {
        writeln!(out, "  {}", root)?;
    }
    Ok(())
}

/// Writes one line per scraped page
pub fn write_records<W: Write>(out: &mut W, records: &[PageRecord]) -> io::Result<()> {
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

/// Writes the terminal line for one stage transition
pub fn write_progress<W: Write>(out: &mut W, progress: &SweepProgress<'_>) -> io::Result<()> {
    match progress {
        SweepProgress::Discovering { .. } => writeln!(out, "Searching for sitemaps..."),
        SweepProgress::RootsDiscovered { roots } => write_roots(out, roots),
        SweepProgress::ScrapingRoot { root } => writeln!(out, "Scraping sitemap: {}", root),
    }
}

/// Writes scraped records followed by statistics
///
/// Nothing is written for a sweep that found no roots; the roots notice
/// has already been printed as progress.
pub fn write_results<W: Write>(out: &mut W, report: &CrawlReport) -> io::Result<()> {
    if report.roots.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    write_records(out, &report.records)?;
    writeln!(out)?;
    write_statistics(out, &CrawlStatistics::from_report(report))
}

/// Runs a sweep and prints progress and results to `out`
///
/// The first write error is returned once the sweep has finished.
pub async fn print_sweep<W: Write>(
    coordinator: &Coordinator,
    base_url: &str,
    out: &mut W,
) -> io::Result<CrawlReport> {
    let mut write_error = None;

    let report = coordinator
        .run_with_progress(base_url, |progress| {
            if write_error.is_none() {
                write_error = write_progress(out, &progress).err();
            }
        })
        .await;

    if let Some(e) = write_error {
        return Err(e);
    }

    write_results(out, &report)?;
    Ok(report)
}
