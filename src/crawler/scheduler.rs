//! Traversal state for a single crawl
//!
//! This module handles:
//! - The FIFO frontier of URLs waiting to be fetched
//! - The discovered set guaranteeing each URL is fetched at most once

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Frontier queue and discovered set, owned by one crawler
///
/// Enqueueing only checks the discovered set, not the frontier itself, so a
/// URL linked from several pages before it is dequeued may sit in the
/// frontier more than once. The first dequeue marks it discovered and later
/// copies are skipped.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// URLs that have been dequeued; never fetched again
    discovered: HashSet<Url>,

    /// URLs awaiting fetch, breadth-first
    frontier: VecDeque<Url>,

    /// Number of duplicate dequeues dropped so far
    skipped: usize,
}

impl CrawlState {
    /// Creates a state whose frontier holds only `seed`
    pub fn new(seed: Url) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back(seed);

        Self {
            discovered: HashSet::new(),
            frontier,
            skipped: 0,
        }
    }

    /// Dequeues the next URL that has not been discovered yet
    ///
    /// The returned URL is marked discovered. Returns `None` once the
    /// frontier is exhausted.
    pub fn next_url(&mut self) -> Option<Url> {
        while let Some(url) = self.frontier.pop_front() {
            if self.discovered.contains(&url) {
                tracing::trace!("Skipping already discovered {}", url);
                self.skipped += 1;
                continue;
            }

            self.discovered.insert(url.clone());
            return Some(url);
        }

        None
    }

    /// Queues `url` unless it has already been discovered
    ///
    /// Returns true if the URL was queued.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.discovered.contains(&url) {
            return false;
        }

        self.frontier.push_back(url);
        true
    }

    /// Queues every undiscovered URL in `links`, returning how many were queued
    pub fn enqueue_all(&mut self, links: impl IntoIterator<Item = Url>) -> usize {
        let mut queued = 0;
        for url in links {
            if self.enqueue(url) {
                queued += 1;
            }
        }
        queued
    }

    /// Marks `url` discovered without fetching it
    ///
    /// Returns false if it was already discovered.
    pub fn mark_discovered(&mut self, url: Url) -> bool {
        self.discovered.insert(url)
    }

    /// Returns true if `url` has been dequeued or marked
    pub fn is_discovered(&self, url: &Url) -> bool {
        self.discovered.contains(url)
    }

    /// URLs currently waiting in the frontier, in dequeue order
    pub fn frontier(&self) -> impl Iterator<Item = &Url> {
        self.frontier.iter()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn discovered_len(&self) -> usize {
        self.discovered.len()
    }

    /// Number of duplicate frontier entries dropped at dequeue time
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
