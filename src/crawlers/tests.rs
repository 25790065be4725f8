use crate::config::{CrawlerConfig, ScoringConfig};
use crate::crawlers::fetch::{FetchError, Fetcher};
use crate::crawlers::web;
use crate::page_type::PageType;
use crate::personas::{IssueKind, Priority};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

const SITE: &str = "https://shop.example.com";

/// In-memory site: path -> body. Unknown paths are 404s.
#[derive(Default)]
struct SiteFetcher {
    pages: HashMap<String, String>,
    slow: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl SiteFetcher {
    fn page(mut self, path: &str, body: &str) -> Self {
        self.pages.insert(format!("{}{}", SITE, path), body.to_string());
        self
    }

    fn slow_page(mut self, path: &str, body: &str) -> Self {
        self.slow.insert(format!("{}{}", SITE, path));
        self.page(path, body)
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for SiteFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        if self.slow.contains(url) {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        match self.pages.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn html(text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\">link</a>", href))
        .collect();
    format!("<html><body><p>{}</p>{}</body></html>", text, anchors)
}

fn config(max_pages: usize) -> CrawlerConfig {
    let mut config = CrawlerConfig::new(&format!("{}/", SITE));
    config.max_pages = max_pages;
    config
}

fn urls(pages: &[crate::results::PageResult]) -> Vec<String> {
    pages.iter().map(|p| p.url.clone()).collect()
}

/// Every page links to ten others, forever
fn dense_site(size: usize) -> SiteFetcher {
    let mut fetcher = SiteFetcher::default();
    for i in 0..size {
        let links: Vec<String> = (1..=10).map(|k| format!("/p{}", (i + k) % size)).collect();
        let links: Vec<&str> = links.iter().map(String::as_str).collect();
        let path = if i == 0 { "/".to_string() } else { format!("/p{}", i) };
        fetcher = fetcher.page(&path, &html("page", &links));
    }
    fetcher.page("/p0", &html("page", &["/p1"]))
}

#[tokio::test]
async fn test_budget_caps_pages() {
    let fetcher = dense_site(50);
    let pages = web::start(&config(3), &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert_eq!(pages.len(), 3);
    assert_eq!(fetcher.calls().len(), 3);
}

#[tokio::test]
async fn test_breadth_first_order() {
    let fetcher = SiteFetcher::default()
        .page("/", &html("home", &["/a", "/b"]))
        .page("/a", &html("a", &["/c"]))
        .page("/b", &html("b", &["/d"]))
        .page("/c", &html("c", &[]))
        .page("/d", &html("d", &[]));

    let pages = web::start(&config(10), &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    let expected: Vec<String> = ["/", "/a", "/b", "/c", "/d"]
        .iter()
        .map(|p| format!("{}{}", SITE, p))
        .collect();
    assert_eq!(urls(&pages), expected);
}

#[tokio::test]
async fn test_failed_start_returns_no_pages() {
    let fetcher = SiteFetcher::default();
    let pages = web::start(&config(5), &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert!(pages.is_empty());
    assert_eq!(fetcher.calls(), vec![format!("{}/", SITE)]);
}

#[tokio::test]
async fn test_unparsable_start_returns_no_pages() {
    let fetcher = SiteFetcher::default();
    let config = CrawlerConfig::new("not a url");
    let pages = web::start(&config, &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert!(pages.is_empty());
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_failures_are_skipped_without_spending_budget() {
    let fetcher = SiteFetcher::default()
        .page("/", &html("home", &["/missing", "/a", "/b"]))
        .page("/a", &html("a", &[]))
        .page("/b", &html("b", &[]));

    let pages = web::start(&config(3), &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert_eq!(
        urls(&pages),
        vec![
            format!("{}/", SITE),
            format!("{}/a", SITE),
            format!("{}/b", SITE)
        ]
    );
    assert!(fetcher.calls().contains(&format!("{}/missing", SITE)));
}

#[tokio::test]
async fn test_each_url_is_fetched_once() {
    let fetcher = SiteFetcher::default()
        .page("/", &html("home", &["/a", "/", "/a", "/b"]))
        .page("/a", &html("a", &["/", "/b"]))
        .page("/b", &html("b", &["/a"]));

    let pages = web::start(&config(25), &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert_eq!(pages.len(), 3);
    let calls = fetcher.calls();
    let unique: HashSet<&String> = calls.iter().collect();
    assert_eq!(calls.len(), unique.len());
}

#[tokio::test]
async fn test_other_domains_are_not_followed() {
    let fetcher = SiteFetcher::default().page(
        "/",
        &html(
            "home",
            &["https://other.com/c", "//www.shop.example.com/a", "/b"],
        ),
    );

    let pages = web::start(&config(25), &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert_eq!(pages.len(), 1);
    let calls = fetcher.calls();
    assert!(calls.iter().all(|c| !c.contains("other.com")));
    assert!(calls.contains(&"https://www.shop.example.com/a".to_string()));
    assert!(calls.contains(&format!("{}/b", SITE)));
}

#[tokio::test]
async fn test_pages_are_scored_and_classified() {
    let fetcher = SiteFetcher::default()
        .page(
            "/",
            &html("Fast delivery TODAY <script>fast fast fast</script>", &["/products/kettle"]),
        )
        .page("/products/kettle", &html("Maybe a kettle", &[]));

    let pages = web::start(&config(25), &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();
    assert_eq!(pages.len(), 2);

    let home = &pages[0];
    assert_eq!(home.page_type, PageType::Landing);
    let fixer = &home.personas["Fixer"];
    // positive: fast + today, proof: delivery + today
    assert_eq!(fixer.score, 16);
    assert_eq!(fixer.priority, Priority::High);
    assert_eq!(fixer.issues, vec![IssueKind::OverallLow]);
    assert_eq!(fixer.suggestions.len(), 1);
    assert_eq!(home.personas.len(), 5);

    let product = &pages[1];
    assert_eq!(product.page_type, PageType::Product);
    assert_eq!(product.personas["Fixer"].score, 0);
    assert!(
        product.personas["Fixer"]
            .issues
            .contains(&IssueKind::ConflictingLanguage)
    );
}

#[tokio::test]
async fn test_zero_budget_fetches_nothing() {
    let fetcher = dense_site(5);
    let pages = web::start(&config(0), &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert!(pages.is_empty());
    assert!(fetcher.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_slow_pages_time_out() {
    let fetcher = SiteFetcher::default()
        .page("/", &html("home", &["/slow", "/a"]))
        .slow_page("/slow", &html("slow", &[]))
        .page("/a", &html("a", &[]));

    let mut config = config(25);
    config.request_timeout_secs = 1;
    let pages = web::start(&config, &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert_eq!(urls(&pages), vec![format!("{}/", SITE), format!("{}/a", SITE)]);
    assert!(fetcher.calls().contains(&format!("{}/slow", SITE)));
}

#[tokio::test]
async fn test_concurrent_crawl_never_overshoots() {
    for workers in [2, 4, 8] {
        let fetcher = dense_site(40);
        let mut config = config(7);
        config.max_concurrency = workers;

        let pages = web::start(&config, &ScoringConfig::default(), &fetcher)
            .await
            .unwrap();

        assert_eq!(pages.len(), 7, "{} workers", workers);
        let calls = fetcher.calls();
        let unique: HashSet<&String> = calls.iter().collect();
        assert_eq!(calls.len(), unique.len(), "{} workers", workers);
        assert_eq!(calls.len(), 7, "{} workers", workers);
    }
}

#[tokio::test]
async fn test_concurrent_crawl_drains_small_site() {
    let fetcher = SiteFetcher::default()
        .page("/", &html("home", &["/a", "/b", "/c"]))
        .page("/a", &html("a", &["/d"]))
        .page("/b", &html("b", &[]))
        .page("/c", &html("c", &["/missing"]))
        .page("/d", &html("d", &["/"]));

    let mut config = config(25);
    config.max_concurrency = 4;
    let pages = web::start(&config, &ScoringConfig::default(), &fetcher)
        .await
        .unwrap();

    assert_eq!(pages.len(), 5);
    assert_eq!(pages[0].url, format!("{}/", SITE));
}

#[tokio::test]
async fn test_invalid_pattern_is_a_config_error() {
    let fetcher = SiteFetcher::default();
    let mut config = config(5);
    config.exclude_patterns = vec!["(".to_string()];

    assert!(
        web::start(&config, &ScoringConfig::default(), &fetcher)
            .await
            .is_err()
    );
    assert!(fetcher.calls().is_empty());
}
