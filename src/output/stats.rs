//! Summary statistics over scraped pages

use crate::crawler::CrawlReport;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of sitemap roots swept
    pub roots: usize,

    /// Number of page records produced
    pub total_pages: usize,

    /// Count of records per HTTP status code
    pub pages_by_status: BTreeMap<u16, usize>,

    /// Records with an empty title
    pub missing_title: usize,

    /// Records with an empty first heading
    pub missing_h1: usize,

    /// Records with an empty meta description
    pub missing_description: usize,
}

impl CrawlStatistics {
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut stats = Self {
            roots: report.roots.len(),
            total_pages: report.records.len(),
            ..Self::default()
        };

        for record in &report.records {
            *stats.pages_by_status.entry(record.status_code).or_insert(0) += 1;
            if record.title.is_empty() {
                stats.missing_title += 1;
            }
            if record.h1.is_empty() {
                stats.missing_h1 += 1;
            }
            if record.meta_description.is_empty() {
                stats.missing_description += 1;
            }
        }

        stats
    }

    /// Records answered with a 2xx status
    pub fn successful_pages(&self) -> usize {
        self.pages_by_status
            .range(200u16..300)
            .map(|(_, count)| count)
            .sum()
    }
}

/// Writes statistics in a formatted manner
pub fn write_statistics<W: Write>(out: &mut W, stats: &CrawlStatistics) -> io::Result<()> {
    writeln!(out, "=== Sweep Statistics ===")?;
    writeln!(out, "  Sitemap roots: {}", stats.roots)?;
    writeln!(out, "  Pages scraped: {}", stats.total_pages)?;

    if !stats.pages_by_status.is_empty() {
        writeln!(out, "  Pages by status:")?;
        for (status, count) in &stats.pages_by_status {
            writeln!(out, "    {}: {}", status, count)?;
        }
    }

    writeln!(out, "  Missing title: {}", stats.missing_title)?;
    writeln!(out, "  Missing h1: {}", stats.missing_h1)?;
    writeln!(out, "  Missing meta description: {}", stats.missing_description)?;
    Ok(())
}
