//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeouts
//! - Element filtering, link extraction and scope checks
//! - The breadth-first frontier
//! - The end-to-end run from seed URL to Markdown file

mod coordinator;
mod fetcher;
mod filter;
mod parser;
mod scheduler;

pub use coordinator::{crawl, CrawlStats, Crawler, FetchedPage};
pub use fetcher::{build_http_client, Fetch, HttpFetcher};
pub use filter::{filter_elements, ElementFilter};
pub use parser::extract_links;
pub use scheduler::CrawlState;

use crate::config::Config;
use crate::output::{aggregate, render_markdown, rewrite_links, write_markdown, MarkdownAggregator};
use crate::url::markdown_file_name;
use crate::SiteError;
use std::path::{Path, PathBuf};
use url::Url;

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Where the Markdown was written
    pub path: PathBuf,

    /// Length of the written Markdown, in characters
    pub characters: usize,

    /// Crawl counters
    pub stats: CrawlStats,
}

/// Crawls the site under `seed` and returns the aggregated Markdown
///
/// Without link rewriting each page is rendered as soon as it is crawled.
/// With rewriting every page is held until the crawl finishes, because the
/// anchor map needs all of them.
pub async fn convert_site<F: Fetch + ?Sized>(
    seed: &Url,
    fetcher: &F,
    config: &Config,
) -> (String, CrawlStats) {
    let filter = ElementFilter::from_config(&config.filters);
    let mut crawler = Crawler::new(seed, fetcher, filter);

    let markdown = if config.output.rewrite_links {
        let mut pages = crawler.collect_pages().await;
        rewrite_links(&mut pages);
        aggregate(&pages, render_markdown)
    } else {
        let mut aggregator = MarkdownAggregator::new(render_markdown);
        while let Some(page) = crawler.next_page().await {
            aggregator.push(&page.document);
        }
        aggregator.finish()
    };

    (markdown, crawler.stats())
}

/// Runs a complete crawl and writes the Markdown file
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Crawl every page under the seed
/// 3. Optionally rewrite cross-page links
/// 4. Convert and join the pages
/// 5. Write `<output dir>/<file name derived from seed>`
///
/// # Arguments
///
/// * `seed` - The validated seed URL
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(RunReport)` - The file was written
/// * `Err(SiteError)` - The client could not be built or the file not written
pub async fn run(seed: &Url, config: &Config) -> Result<RunReport, SiteError> {
    let fetcher = HttpFetcher::new(&config.crawler)?;
    let (markdown, stats) = convert_site(seed, &fetcher, config).await;

    tracing::info!(
        "Crawl finished: {} pages converted, {} failed",
        stats.emitted,
        stats.failed
    );

    let path = Path::new(&config.output.directory).join(markdown_file_name(seed));
    write_markdown(&path, &markdown)?;

    let characters = markdown.chars().count();
    tracing::info!("Wrote {} characters to {}", characters, path.display());

    Ok(RunReport {
        path,
        characters,
        stats,
    })
}
