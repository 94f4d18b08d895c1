//! Output module for turning crawled pages into the final document
//!
//! This module handles:
//! - Rewriting links between crawled pages into in-document anchors
//! - Converting pages to Markdown and joining them in crawl order
//! - Writing the result to disk

mod anchors;
mod markdown;

pub use anchors::{heading_anchor, rewrite_document, rewrite_links, slugify, Anchor, AnchorMap};
pub use markdown::{
    aggregate, page_content_html, render_markdown, write_markdown, MarkdownAggregator,
    PAGE_SEPARATOR,
};
