use url::Url;

/// Extracts the host from a URL, lowercased
///
/// # Examples
///
/// ```
/// use url::Url;
/// use page_harvest::url::extract_domain;
///
/// let url = Url::parse("https://Sub.EXAMPLE.com:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("sub.example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Turns a URL's host into a filesystem-friendly slug
///
/// Every `.` in the host is replaced with `_`, so `www.example.com` becomes
/// `www_example_com`. The port and path never take part.
///
/// # Returns
///
/// * `Some(String)` - The slug
/// * `None` - The URL has no host
pub fn host_slug(url: &Url) -> Option<String> {
    extract_domain(url)
        .filter(|host| !host.is_empty())
        .map(|host| host.replace('.', "_"))
}
