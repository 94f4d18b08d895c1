//! URL handling module for Site-Markdown
//!
//! This module provides seed validation, href resolution, the crawl scope,
//! and the output file name derived from the seed.

mod filename;
mod scope;

use crate::SiteError;
use url::{ParseError, Url};

// Re-export main functions
pub use filename::markdown_file_name;
pub use scope::{is_in_scope, UrlScope};

/// Parses the seed URL a crawl starts from
///
/// The seed must be an absolute `http` or `https` URL with a host. Anything
/// else fails before crawling begins.
///
/// # Examples
///
/// ```
/// use site_markdown::url::parse_seed;
///
/// assert!(parse_seed("https://openfga.dev/docs/fga").is_ok());
/// assert!(parse_seed("/docs/fga").is_err());
/// ```
pub fn parse_seed(input: &str) -> Result<Url, SiteError> {
    let url = Url::parse(input.trim()).map_err(|_| SiteError::InvalidSeed(input.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(SiteError::InvalidSeed(input.to_string()));
    }

    Ok(url)
}

/// Returns true if `href` only names a fragment of the current page
///
/// An href is fragment-only when it is not an absolute URL and its literal
/// text begins with `#`.
///
/// # Examples
///
/// ```
/// use site_markdown::url::is_fragment_only;
///
/// assert!(is_fragment_only("#header_1"));
/// assert!(!is_fragment_only("/sub1/sub2#header_2"));
/// assert!(!is_fragment_only("https://openfga.dev/docs/fga#benefits"));
/// ```
pub fn is_fragment_only(href: &str) -> bool {
    let href = href.trim();
    Url::parse(href).is_err() && href.starts_with('#')
}

/// Resolves an href found on the page at `origin` to an absolute URL
///
/// Returns `None` for empty, fragment-only and malformed hrefs. Relative
/// hrefs are resolved against `origin`; the fragment is kept.
pub fn resolve_href(href: &str, origin: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || is_fragment_only(href) {
        return None;
    }

    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => match origin.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!("Skipping malformed link {:?} on {}: {}", href, origin, e);
                None
            }
        },
        Err(e) => {
            tracing::debug!("Skipping malformed link {:?} on {}: {}", href, origin, e);
            None
        }
    }
}

/// Returns true if `href` is written as an absolute URL
pub(crate) fn is_absolute(href: &str) -> bool {
    Url::parse(href.trim()).is_ok()
}
