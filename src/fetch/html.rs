// src/fetch/html.rs
// =============================================================================
// A Document backed by an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative links against the page URL.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use super::Document;
use crate::error::ExtractError;

// A downloaded HTML page and the URL it was served from
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    base_url: String,
    html: String,
}

impl HtmlDocument {
    pub fn new(base_url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            html: html.into(),
        }
    }
}

impl Document for HtmlDocument {
    fn extract_links(&self) -> Result<Vec<String>, ExtractError> {
        let base = Url::parse(&self.base_url).map_err(|e| ExtractError::InvalidBase {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(extract_html_links(&self.html, &base))
    }
}

// Extracts all crawlable links from HTML content, in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base = "https://example.com"
//   result = ["https://example.com/docs"]
fn extract_html_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    // Our selector "a[href]" is a constant and known to be valid
    let selector = Selector::parse("a[href]").expect("static selector is valid");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .collect()
}

// Resolves a (possibly relative) link to an absolute http(s) URL
//
// Fragments are dropped so "page#a" and "page#b" are the same page.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    // Skip anchors and special protocols
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url.to_string())
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does base.join() handle absolute links too?
//    - join() follows the same rules a browser does
//    - "https://other.com" joined onto anything is just "https://other.com/"
//    - "../about" is resolved relative to the base path
//
// 2. Why is Html parsed inside extract_links and not stored?
//    - scraper::Html is not Send, so it can't live inside a Document that
//      moves between worker tasks
//    - We keep the raw String and parse on the extraction worker instead
// -----------------------------------------------------------------------------
