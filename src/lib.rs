// Re-export modules
pub mod config;
pub mod crawlers;
pub mod filter;
pub mod page_type;
pub mod parsers;
pub mod personas;
pub mod results;
pub mod server;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ConfigError, CrawlerConfig, ScoringConfig};
pub use crawlers::{FetchError, Fetcher, HttpFetcher};
pub use results::{CrawlResponse, PageResult, PersonaScore, PersonaScores};

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Builder for a single persona crawl
pub struct Crawl {
    config: CrawlerConfig,
}

impl Crawl {
    /// Create a new crawl of the given start URL with default settings
    pub fn new(start_url: &str) -> Self {
        Self {
            config: CrawlerConfig::new(start_url),
        }
    }

    /// Create a crawl from a complete configuration
    pub fn from_config(config: CrawlerConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::from_config(CrawlerConfig::from_file(path)?))
    }

    /// Replace the start URL
    pub fn with_start_url(mut self, start_url: &str) -> Self {
        self.config.start_url = start_url.to_string();
        self
    }

    /// Set the maximum number of successfully fetched pages
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the maximum number of concurrent fetches
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.request_timeout_secs = timeout_seconds;
        self
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Run the crawl over HTTP
    pub async fn run(self, scoring: &ScoringConfig) -> Result<Vec<PageResult>, CrawlError> {
        self.config.validate()?;
        let fetcher = HttpFetcher::from_config(&self.config)?;
        Ok(self.run_with(&fetcher, scoring).await?)
    }

    /// Run the crawl with a caller-supplied fetcher
    pub async fn run_with<F: Fetcher>(
        self,
        fetcher: &F,
        scoring: &ScoringConfig,
    ) -> Result<Vec<PageResult>, ConfigError> {
        crawlers::web::start(&self.config, scoring, fetcher).await
    }
}

/// Crawls `start_url` over HTTP with the built-in persona tables, returning
/// up to `max_pages` scored pages in breadth-first order
pub async fn crawl(start_url: &str, max_pages: usize) -> Result<Vec<PageResult>, CrawlError> {
    Crawl::new(start_url)
        .with_max_pages(max_pages)
        .run(&ScoringConfig::default())
        .await
}
