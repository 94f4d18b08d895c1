//! Link extraction from fetched pages
//!
//! Only `<a href="...">` targets are considered. Each one is resolved against
//! the page it was found on and kept only if the crawl scope admits it.

use crate::url::UrlScope;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the crawlable links of a document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` targets inside the scope, resolved against `origin`
///
/// **Exclude:**
/// - Empty or missing hrefs
/// - Malformed URLs
/// - Fragment-only hrefs (`#section`)
/// - The literal site root `/`
/// - Anything outside the scope
///
/// Links are returned in document order; repeated targets appear once.
/// The extractor keeps no crawl state, so already-visited pages are the
/// caller's concern.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use site_markdown::crawler::extract_links;
/// use site_markdown::url::UrlScope;
/// use url::Url;
///
/// let origin = Url::parse("https://example.com/docs/intro").unwrap();
/// let html = Html::parse_document(r#"<a href="setup">Setup</a><a href="/">Home</a>"#);
/// let links = extract_links(&html, &origin, &UrlScope::new(&origin));
/// assert_eq!(links, vec![Url::parse("https://example.com/docs/setup").unwrap()]);
/// ```
pub fn extract_links(document: &Html, origin: &Url, scope: &UrlScope) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if let Some(url) = scope.admit(href, origin) {
                if seen.insert(url.clone()) {
                    links.push(url);
                }
            }
        }
    }

    links
}
