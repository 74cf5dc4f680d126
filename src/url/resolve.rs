use crate::UrlError;
use url::Url;

/// Schemes the crawler is willing to fetch
const CRAWLABLE_SCHEMES: &[&str] = &["http", "https"];

/// Resolves a reference found on a page against that page's URL
///
/// Standard relative-reference resolution is applied first, then the result
/// is validated: it must carry a host and use the `http` or `https` scheme.
/// Anything else (unparseable references, `javascript:`, `mailto:`, `data:`
/// and friends) is silently dropped.
///
/// No canonicalization happens beyond resolution itself. Two references are
/// the same crawl target only if their resolved string forms are identical.
///
/// # Examples
///
/// ```
/// use page_harvest::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/a/").unwrap();
/// let link = resolve(&base, "../b.html").unwrap();
/// assert_eq!(link.as_str(), "https://example.com/b.html");
///
/// assert!(resolve(&base, "javascript:void(0)").is_none());
/// ```
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    let resolved = base.join(reference).ok()?;
    is_crawlable(&resolved).then_some(resolved)
}

/// Returns true if the URL has a host and an http(s) scheme
pub fn is_crawlable(url: &Url) -> bool {
    CRAWLABLE_SCHEMES.contains(&url.scheme()) && url.host_str().is_some_and(|h| !h.is_empty())
}

/// Parses and validates a seed URL supplied at invocation
///
/// Unlike [`resolve`], this reports why a URL is unusable, since a bad seed
/// is a configuration error that must stop the run before it starts.
///
/// # Arguments
///
/// * `raw` - The seed URL as given by the user
///
/// # Returns
///
/// * `Ok(Url)` - The parsed seed
/// * `Err(UrlError)` - The seed is malformed, has no host or a foreign scheme
pub fn parse_seed_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if !CRAWLABLE_SCHEMES.contains(&url.scheme()) {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if !url.host_str().is_some_and(|h| !h.is_empty()) {
        return Err(UrlError::MissingHost(raw.to_string()));
    }

    Ok(url)
}
