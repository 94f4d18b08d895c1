//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties together:
//! - The frontier and discovered set
//! - Fetching and element filtering
//! - Link extraction and enqueueing
//! - Yielding pages in breadth-first order

use crate::crawler::fetcher::Fetch;
use crate::crawler::filter::ElementFilter;
use crate::crawler::parser::extract_links;
use crate::crawler::scheduler::CrawlState;
use crate::url::UrlScope;
use scraper::Html;
use url::Url;

/// A successfully fetched (and filtered) page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL the page was fetched from
    pub url: Url,

    /// The parsed document
    pub document: Html,
}

/// Counters for a crawl in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched and yielded
    pub emitted: usize,

    /// Pages whose fetch failed
    pub failed: usize,

    /// Duplicate frontier entries dropped
    pub skipped: usize,
}

/// Breadth-first crawler over everything under a seed URL
///
/// Pages are produced one at a time by [`Crawler::next_page`]; the crawl only
/// advances while the caller keeps asking. Fetch failures are logged and
/// skipped, never retried.
pub struct Crawler<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    scope: UrlScope,
    filter: ElementFilter,
    state: CrawlState,
    stats: CrawlStats,
}

impl<'a, F: Fetch + ?Sized> Crawler<'a, F> {
    /// Creates a crawler starting at `seed`
    ///
    /// # Arguments
    ///
    /// * `seed` - First page to fetch; also defines the crawl scope
    /// * `fetcher` - Retrieves and parses pages
    /// * `filter` - Elements to strip from each page before link extraction
    pub fn new(seed: &Url, fetcher: &'a F, filter: ElementFilter) -> Self {
        Self {
            fetcher,
            scope: UrlScope::new(seed),
            filter,
            state: CrawlState::new(seed.clone()),
            stats: CrawlStats::default(),
        }
    }

    /// Fetches and returns the next page, or `None` when the crawl is done
    ///
    /// Per dequeued URL:
    /// 1. Skip it if it was already discovered
    /// 2. Fetch it; on failure log and move on
    /// 3. Apply the element filter
    /// 4. Queue the undiscovered in-scope links, resolved against this page
    /// 5. Yield the page
    pub async fn next_page(&mut self) -> Option<FetchedPage> {
        while let Some(url) = self.state.next_url() {
            tracing::info!("Loading {}", url);

            let mut document = match self.fetcher.fetch(&url).await {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}", url, e);
                    self.stats.failed += 1;
                    continue;
                }
            };

            if !self.filter.is_empty() {
                self.filter.apply(&mut document);
            }

            let links = extract_links(&document, &url, &self.scope);
            let found = links.len();
            let queued = self.state.enqueue_all(links);
            tracing::debug!(
                "{}: {} in-scope links, {} queued, {} in frontier",
                url,
                found,
                queued,
                self.state.frontier_len()
            );

            self.stats.emitted += 1;
            return Some(FetchedPage { url, document });
        }

        tracing::debug!("Frontier is empty, crawl complete");
        None
    }

    /// Runs the crawl to completion and returns every page in crawl order
    pub async fn collect_pages(&mut self) -> Vec<FetchedPage> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await {
            pages.push(page);
        }
        pages
    }

    /// Counters so far
    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            skipped: self.state.skipped(),
            ..self.stats
        }
    }

    /// The current traversal state
    pub fn state(&self) -> &CrawlState {
        &self.state
    }
}

/// Crawls everything under `seed` and returns the pages in crawl order
///
/// # Example
///
/// ```no_run
/// use site_markdown::config::CrawlerConfig;
/// use site_markdown::crawler::{crawl, ElementFilter, HttpFetcher};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = HttpFetcher::new(&CrawlerConfig::default())?;
/// let seed = Url::parse("https://openfga.dev/docs/fga")?;
/// let pages = crawl(&seed, &fetcher, ElementFilter::default()).await;
/// println!("Crawled {} pages", pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl<F: Fetch + ?Sized>(
    seed: &Url,
    fetcher: &F,
    filter: ElementFilter,
) -> Vec<FetchedPage> {
    Crawler::new(seed, fetcher, filter).collect_pages().await
}
