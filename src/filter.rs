use crate::utils::domain_key;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for URL filtering in crawlers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlFilterConfig {
    /// Host every followed link must share with the start page (`www.`-stripped).
    /// Links that resolve to no host at all are also followed.
    pub required_domain: String,

    /// Regex patterns for URLs to include (if empty, all URLs are included unless excluded)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude (these take precedence over include patterns)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl UrlFilterConfig {
    /// Scopes the filter to the domain of the crawl's start URL
    pub fn for_start_url(start_url: &Url) -> Self {
        Self {
            required_domain: domain_key(start_url),
            ..Self::default()
        }
    }
}

/// Decides which discovered links the crawl may follow
#[derive(Debug)]
pub struct UrlFilter {
    config: UrlFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a new URL filter from configuration
    pub fn new(config: UrlFilterConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Domain every accepted link must belong to
    pub fn required_domain(&self) -> &str {
        &self.config.required_domain
    }

    /// Determine if a resolved URL should be crawled based on all filtering rules
    pub fn should_crawl(&self, url: &Url) -> bool {
        if !self.is_in_domain_scope(url) {
            return false;
        }

        // Exclusions take precedence
        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|r| r.is_match(url_str)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|r| r.is_match(url_str))
    }

    /// Check if a URL is within the allowed domain scope
    fn is_in_domain_scope(&self, url: &Url) -> bool {
        let domain = domain_key(url);
        domain.is_empty() || domain == self.config.required_domain
    }

    /// Resolves raw anchor targets against the page they were found on and
    /// keeps the ones in scope
    ///
    /// Duplicates and already-visited URLs are kept; the crawl frontier
    /// drops them when they are dequeued.
    pub fn resolve_links(&self, page_url: &str, hrefs: &[String]) -> Vec<String> {
        let base = match Url::parse(page_url) {
            Ok(base) => base,
            Err(e) => {
                ::log::warn!("Cannot resolve links against {}: {}", page_url, e);
                return Vec::new();
            }
        };

        let mut accepted = Vec::new();
        for href in hrefs {
            let resolved = match base.join(href) {
                Ok(resolved) => resolved,
                Err(e) => {
                    ::log::trace!("Unresolvable link {:?} on {}: {}", href, page_url, e);
                    continue;
                }
            };

            if self.should_crawl(&resolved) {
                ::log::trace!("URL filter accepted: {}", resolved);
                accepted.push(resolved.into());
            } else {
                ::log::trace!("URL filter rejected: {}", resolved);
            }
        }

        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_for(start: &str) -> UrlFilter {
        let start = Url::parse(start).unwrap();
        UrlFilter::new(UrlFilterConfig::for_start_url(&start)).unwrap()
    }

    fn links(hrefs: &[&str]) -> Vec<String> {
        hrefs.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn test_protocol_relative_link_on_same_domain() {
        let filter = filter_for("https://www.example.com/a");
        let accepted = filter.resolve_links("https://www.example.com/a", &links(&["//www.example.com/b"]));
        assert_eq!(accepted, vec!["https://www.example.com/b"]);
    }

    #[test]
    fn test_cross_domain_link_is_rejected() {
        let filter = filter_for("https://www.example.com/a");
        let accepted = filter.resolve_links("https://www.example.com/a", &links(&["https://other.com/c"]));
        assert!(accepted.is_empty());
    }

    #[test]
    fn test_www_difference_is_ignored() {
        let filter = filter_for("https://example.com/");
        let accepted = filter.resolve_links(
            "https://example.com/",
            &links(&["https://www.example.com/x", "https://shop.example.com/y"]),
        );
        assert_eq!(accepted, vec!["https://www.example.com/x"]);
    }

    #[test]
    fn test_relative_forms_resolve_against_page() {
        let filter = filter_for("https://example.com/");
        let accepted = filter.resolve_links(
            "https://example.com/shop/index.html",
            &links(&["widget", "../about", "/contact", "?page=2", "#reviews", ""]),
        );
        assert_eq!(
            accepted,
            vec![
                "https://example.com/shop/widget",
                "https://example.com/about",
                "https://example.com/contact",
                "https://example.com/shop/index.html?page=2",
                "https://example.com/shop/index.html#reviews",
                "https://example.com/shop/index.html",
            ]
        );
    }

    #[test]
    fn test_hostless_links_are_in_scope() {
        let filter = filter_for("https://example.com/");
        let accepted = filter.resolve_links("https://example.com/", &links(&["mailto:sales@example.com"]));
        assert_eq!(accepted, vec!["mailto:sales@example.com"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let filter = filter_for("https://example.com/");
        let accepted = filter.resolve_links("https://example.com/", &links(&["/a", "/a", "https://example.com/a"]));
        assert_eq!(accepted.len(), 3);
    }

    #[test]
    fn test_unparsable_links_are_skipped() {
        let filter = filter_for("https://example.com/");
        let accepted = filter.resolve_links("https://example.com/", &links(&["http://[broken", "/ok"]));
        assert_eq!(accepted, vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_regex_patterns() {
        let config = UrlFilterConfig {
            required_domain: "example.com".to_string(),
            include_patterns: vec![r"/docs/.*\.html$".to_string()],
            exclude_patterns: vec![r"/docs/draft/".to_string()],
        };
        let filter = UrlFilter::new(config).unwrap();

        let included = Url::parse("https://example.com/docs/page.html").unwrap();
        assert!(filter.should_crawl(&included));

        let not_included = Url::parse("https://example.com/docs/page.txt").unwrap();
        assert!(!filter.should_crawl(&not_included));

        let excluded = Url::parse("https://example.com/docs/draft/page.html").unwrap();
        assert!(!filter.should_crawl(&excluded));

        let wrong_domain = Url::parse("https://other.com/docs/page.html").unwrap();
        assert!(!filter.should_crawl(&wrong_domain));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let config = UrlFilterConfig {
            exclude_patterns: vec!["(".to_string()],
            ..UrlFilterConfig::default()
        };
        assert!(UrlFilter::new(config).is_err());
    }
}
