//! Page metadata extraction
//!
//! This module turns a fetched page into a [`PageRecord`]. The scraper only
//! depends on the [`PageParser`] trait, so extraction logic can be swapped
//! without touching scheduling.

use crate::crawler::fetcher::FetchedPage;
use crate::ParseError;
use scraper::{Html, Selector};
use std::fmt;

/// SEO data extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PageRecord {
    /// Final URL of the page
    pub url: String,

    /// HTTP status code of the response
    pub status_code: u16,

    /// Text of the first `<title>` element
    pub title: String,

    /// Text of the first `<h1>` element
    pub h1: String,

    /// `content` of the first description meta tag
    pub meta_description: String,
}

impl fmt::Display for PageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | title: {:?} | h1: {:?} | description: {:?}",
            self.status_code, self.url, self.title, self.h1, self.meta_description
        )
    }
}

/// Extracts a [`PageRecord`] from a fetched page
pub trait PageParser: Send + Sync {
    fn parse(&self, page: &FetchedPage) -> Result<PageRecord, ParseError>;
}

/// Default parser reading title, first heading, and meta description
#[derive(Debug, Clone, Copy, Default)]
pub struct SeoParser;

impl PageParser for SeoParser {
    /// Missing elements produce empty strings rather than errors.
    ///
    /// # Example
    ///
    /// ```
    /// use sitemap_sweep::crawler::{FetchedPage, PageParser, SeoParser};
    ///
    /// let page = FetchedPage {
    ///     url: "https://example.com/".to_string(),
    ///     status_code: 200,
    ///     body: "<html><head><title>Home</title></head><body><h1>Welcome</h1></body></html>".to_string(),
    /// };
    /// let record = SeoParser.parse(&page).unwrap();
    /// assert_eq!(record.title, "Home");
    /// assert_eq!(record.h1, "Welcome");
    /// ```
    fn parse(&self, page: &FetchedPage) -> Result<PageRecord, ParseError> {
        let document = Html::parse_document(&page.body);

        Ok(PageRecord {
            url: page.url.clone(),
            status_code: page.status_code,
            title: first_text(&document, "title", &page.url)?,
            h1: first_text(&document, "h1", &page.url)?,
            meta_description: meta_description(&document, &page.url)?,
        })
    }
}

fn selector(css: &str, url: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Html {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Trimmed text of the first element matching `css`, or empty
fn first_text(document: &Html, css: &str, url: &str) -> Result<String, ParseError> {
    let selector = selector(css, url)?;

    Ok(document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default())
}

fn meta_description(document: &Html, url: &str) -> Result<String, ParseError> {
    let selector = selector("meta[name^=description]", url)?;

    Ok(document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default())
}
