use url::Url;

/// Host used for same-domain comparisons: the URL's host plus any explicit
/// non-default port, with a leading `www.` removed
///
/// URLs without a host (`mailto:`, `javascript:` and the like) give an empty
/// string.
pub fn domain_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
