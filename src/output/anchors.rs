//! Rewriting of cross-page links into in-document anchors
//!
//! Once every page is crawled, each page's first `<h1>` becomes the anchor
//! that stands for the page in the aggregated document. Links pointing at a
//! crawled page are then replaced by a paragraph holding a link to that
//! anchor, which renders as `[Heading](#slug)`.

use crate::crawler::FetchedPage;
use crate::url::{is_absolute, resolve_href};
use scraper::node::{Element, Node, Text};
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// The in-document target standing for a crawled page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Trimmed text of the page's first `<h1>`
    pub heading: String,

    /// Fragment the heading is reachable under, without the `#`
    pub slug: String,
}

impl Anchor {
    pub fn new(heading: &str) -> Self {
        Self {
            heading: heading.to_string(),
            slug: slugify(heading),
        }
    }

    /// `#<slug>`
    pub fn href(&self) -> String {
        format!("#{}", self.slug)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}](#{})", self.heading, self.slug)
    }
}

/// Anchor references for every crawled page that has a heading
///
/// Entries are keyed by full URL and by path. When two pages share a path
/// (different host or query), the first one registered keeps the path entry.
#[derive(Debug, Clone, Default)]
pub struct AnchorMap {
    by_url: HashMap<Url, Anchor>,
    by_path: HashMap<String, Anchor>,
}

impl AnchorMap {
    /// Builds the map from pages in crawl order
    pub fn build(pages: &[FetchedPage]) -> Self {
        let mut map = Self::default();

        for page in pages {
            match heading_anchor(&page.document) {
                Some(anchor) => map.insert(&page.url, anchor),
                None => tracing::debug!("No <h1> on {}, links to it stay as-is", page.url),
            }
        }

        map
    }

    /// Registers `anchor` for `url` and for its path
    pub fn insert(&mut self, url: &Url, anchor: Anchor) {
        self.by_path
            .entry(url.path().to_string())
            .or_insert_with(|| anchor.clone());
        self.by_url.insert(url.clone(), anchor);
    }

    /// Finds the anchor an href on the page at `origin` points to
    ///
    /// The href is resolved like a crawled link, without the scope check.
    /// Relative hrefs that miss on the full URL fall back to the path entry.
    pub fn lookup(&self, href: &str, origin: &Url) -> Option<&Anchor> {
        let resolved = resolve_href(href, origin)?;

        if let Some(anchor) = self.by_url.get(&resolved) {
            return Some(anchor);
        }

        if is_absolute(href) {
            return None;
        }

        self.by_path.get(resolved.path())
    }

    /// Number of pages with an anchor
    pub fn len(&self) -> usize {
        self.by_url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }
}

/// Turns heading text into an anchor slug: spaces become hyphens, then lowercase
///
/// # Examples
///
/// ```
/// use site_markdown::output::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// ```
pub fn slugify(text: &str) -> String {
    text.trim().replace(' ', "-").to_lowercase()
}

/// Builds the anchor for the first `<h1>` of a document
///
/// Returns `None` when there is no `<h1>` or its text is blank.
pub fn heading_anchor(document: &Html) -> Option<Anchor> {
    let selector = Selector::parse("h1").ok()?;
    let heading = document.select(&selector).next()?;

    let text = heading.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(Anchor::new(text))
}

/// Replaces links between crawled pages with in-document anchor paragraphs
///
/// Needs the complete page set: the anchor map is built before any page is
/// touched. Returns the number of links rewritten.
pub fn rewrite_links(pages: &mut [FetchedPage]) -> usize {
    let anchors = AnchorMap::build(pages);
    if anchors.is_empty() {
        return 0;
    }

    let mut rewritten = 0;
    for page in pages.iter_mut() {
        rewritten += rewrite_document(&mut page.document, &page.url, &anchors);
    }

    tracing::info!(
        "Rewrote {} links using {} page anchors",
        rewritten,
        anchors.len()
    );
    rewritten
}

/// Rewrites the links of a single document against `anchors`
///
/// Each matching `<a>` is replaced by `<p><a href="#slug">Heading</a></p>`.
pub fn rewrite_document(document: &mut Html, origin: &Url, anchors: &AnchorMap) -> usize {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return 0;
    };
    let Some((paragraph, link_template)) = replacement_elements() else {
        return 0;
    };

    let targets: Vec<_> = document
        .select(&a_selector)
        .filter_map(|link| {
            let href = link.value().attr("href")?;
            let anchor = anchors.lookup(href, origin)?;
            Some((link.id(), anchor.clone()))
        })
        .collect();

    let count = targets.len();
    for (id, anchor) in targets {
        if let Some(mut link) = document.tree.get_mut(id) {
            let mut replacement = link.insert_before(Node::Element(paragraph.clone()));
            let mut anchor_link =
                replacement.append(Node::Element(anchor_element(&link_template, &anchor)));
            anchor_link.append(Node::Text(Text {
                text: anchor.heading.as_str().into(),
            }));
            link.detach();
        }
    }

    count
}

/// An `<a>` pointing at `anchor`, built from a bare `<a href>` element
fn anchor_element(template: &Element, anchor: &Anchor) -> Element {
    let mut element = template.clone();
    for (name, value) in element.attrs.iter_mut() {
        if &*name.local == "href" {
            *value = anchor.href().as_str().into();
        }
    }
    element
}

/// Bare `<p>` and `<a href>` elements to graft into documents
fn replacement_elements() -> Option<(Element, Element)> {
    let fragment = Html::parse_fragment(r##"<p><a href="#"></a></p>"##);
    let paragraph = fragment.select(&Selector::parse("p").ok()?).next()?;
    let link = fragment.select(&Selector::parse("a").ok()?).next()?;

    Some((paragraph.value().clone(), link.value().clone()))
}
