use super::resolve_href;
use url::Url;

/// The crawl boundary derived from a seed URL
///
/// A URL is in scope when it shares the seed's scheme, host and port and its
/// path lies under the seed's base directory, i.e. the seed path up to and
/// including its last `/`. For `https://example.com/test/stuff` that is
/// `/test/`, so `https://example.com/test/page1` is a sibling in scope.
#[derive(Debug, Clone)]
pub struct UrlScope {
    seed: Url,
    base_dir: String,
}

impl UrlScope {
    /// Creates the scope rooted at `seed`
    pub fn new(seed: &Url) -> Self {
        let path = seed.path();
        let base_dir = match path.rfind('/') {
            Some(idx) => path[..=idx].to_string(),
            None => "/".to_string(),
        };

        Self {
            seed: seed.clone(),
            base_dir,
        }
    }

    /// The seed this scope was built from
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Returns true if `candidate` lies under the seed's base directory
    pub fn contains(&self, candidate: &Url) -> bool {
        candidate.scheme() == self.seed.scheme()
            && candidate.host_str() == self.seed.host_str()
            && candidate.port_or_known_default() == self.seed.port_or_known_default()
            && candidate.path().starts_with(&self.base_dir)
    }

    /// Resolves an href found on `origin` and admits it if it is crawlable
    ///
    /// Returns `None` for empty, malformed and fragment-only hrefs, for the
    /// literal site root `/`, and for anything outside the scope.
    pub fn admit(&self, href: &str, origin: &Url) -> Option<Url> {
        if href.trim() == "/" {
            return None;
        }

        resolve_href(href, origin).filter(|url| self.contains(url))
    }
}

/// Returns true if `candidate` is contained by the scope of `seed`
pub fn is_in_scope(candidate: &Url, seed: &Url) -> bool {
    UrlScope::new(seed).contains(candidate)
}
