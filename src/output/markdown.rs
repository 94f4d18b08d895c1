//! Markdown rendering and aggregation
//!
//! Each page's body is converted with `htmd`, and the results are joined in
//! crawl order with a blank line between pages.

use crate::crawler::FetchedPage;
use scraper::{Html, Selector};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Separator placed between consecutive pages
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Converts an HTML fragment to Markdown
///
/// Conversion errors are logged and the fragment's plain text is returned
/// instead, so rendering never fails.
pub fn render_markdown(html: &str) -> String {
    match htmd::convert(html) {
        Ok(markdown) => markdown,
        Err(e) => {
            tracing::warn!("Markdown conversion failed, falling back to text: {}", e);
            Html::parse_fragment(html)
                .root_element()
                .text()
                .collect::<String>()
        }
    }
}

/// The HTML that gets rendered for a page: the inner HTML of `<body>`, or
/// the whole document when there is none
pub fn page_content_html(document: &Html) -> String {
    Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next().map(|body| body.inner_html()))
        .unwrap_or_else(|| document.html())
}

/// Incremental builder for the aggregated document
///
/// Pages are rendered as they are pushed, so the caller can drop each
/// document right away.
pub struct MarkdownAggregator<F> {
    render: F,
    output: String,
    pages: usize,
}

impl<F: Fn(&str) -> String> MarkdownAggregator<F> {
    pub fn new(render: F) -> Self {
        Self {
            render,
            output: String::new(),
            pages: 0,
        }
    }

    /// Renders `document` and appends it
    pub fn push(&mut self, document: &Html) {
        let markdown = (self.render)(&page_content_html(document));
        if self.pages > 0 {
            self.output.push_str(PAGE_SEPARATOR);
        }
        self.output.push_str(&markdown);
        self.pages += 1;
    }

    /// Number of pages pushed so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Returns the aggregated Markdown
    pub fn finish(self) -> String {
        self.output
    }
}

/// Renders every page and joins them in order
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use site_markdown::crawler::FetchedPage;
/// use site_markdown::output::aggregate;
/// use url::Url;
///
/// let pages = vec![
///     FetchedPage {
///         url: Url::parse("https://example.com/a").unwrap(),
///         document: Html::parse_document("<p>one</p>"),
///     },
///     FetchedPage {
///         url: Url::parse("https://example.com/b").unwrap(),
///         document: Html::parse_document("<p>two</p>"),
///     },
/// ];
/// let markdown = aggregate(&pages, |html| html.len().to_string());
/// assert_eq!(markdown, "10\n\n10");
/// ```
pub fn aggregate<F: Fn(&str) -> String>(pages: &[FetchedPage], render: F) -> String {
    let mut aggregator = MarkdownAggregator::new(render);
    for page in pages {
        aggregator.push(&page.document);
    }
    aggregator.finish()
}

/// Writes the aggregated Markdown to `path` as UTF-8
///
/// Missing parent directories are created; an existing file is replaced.
pub fn write_markdown(path: &Path, markdown: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}
