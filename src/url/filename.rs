use url::Url;

/// Derives the output file name for a crawl from its seed URL
///
/// The host is followed by each non-empty path segment, dot-joined, with a
/// `.md` suffix. A seed without path segments yields `<host>.md`.
///
/// # Examples
///
/// ```
/// use site_markdown::url::markdown_file_name;
/// use url::Url;
///
/// let seed = Url::parse("https://openfga.dev/docs/fga").unwrap();
/// assert_eq!(markdown_file_name(&seed), "openfga.dev.docs.fga.md");
/// ```
pub fn markdown_file_name(seed: &Url) -> String {
    let host = seed.host_str().unwrap_or_default();

    let segments: Vec<&str> = seed
        .path_segments()
        .map(|segments| {
            segments
                .map(|s| s.trim_matches('/'))
                .filter(|s| !s.trim().is_empty())
                .collect()
        })
        .unwrap_or_default();

    if segments.is_empty() {
        format!("{}.md", host)
    } else {
        format!("{}.{}.md", host, segments.join("."))
    }
}
