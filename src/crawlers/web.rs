use crate::config::{ConfigError, CrawlerConfig, ScoringConfig};
use crate::crawlers::fetch::{FetchError, Fetcher};
use crate::crawlers::session::{CrawlSession, NextUrl};
use crate::filter::{UrlFilter, UrlFilterConfig};
use crate::page_type::PageType;
use crate::parsers;
use crate::personas;
use crate::results::PageResult;
use futures::future::join_all;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, Notify};
use url::Url;

/// Shared, read-only view of one crawl handed to every worker
struct WorkerContext<'a, F> {
    fetcher: &'a F,
    scoring: &'a ScoringConfig,
    url_filter: &'a UrlFilter,
    request_timeout: Duration,
    session: &'a Mutex<CrawlSession>,
    wakeup: &'a Notify,
}

/// Crawls one site breadth-first and scores every page it fetches.
///
/// With `max_concurrency == 1` pages come back in breadth-first order. With
/// more workers they come back in the order their fetches completed. Fetch
/// failures never fail the crawl; the only error is a bad URL pattern in
/// `config`.
///
/// # Arguments
///
/// * `config` - Web crawler configuration
/// * `scoring` - Persona tables every page is scored against
/// * `fetcher` - Source of page bodies
pub async fn start<F: Fetcher>(
    config: &CrawlerConfig,
    scoring: &ScoringConfig,
    fetcher: &F,
) -> Result<Vec<PageResult>, ConfigError> {
    ::log::info!(
        "Starting web crawler for: {} (max {} pages)",
        config.start_url,
        config.max_pages
    );

    let root_url = match Url::parse(&config.start_url) {
        Ok(url) => url,
        Err(e) => {
            ::log::warn!("Cannot crawl {}: {}", config.start_url, e);
            return Ok(Vec::new());
        }
    };

    let url_filter = create_url_filter(&root_url, config)?;
    ::log::debug!("Crawl scoped to domain {:?}", url_filter.required_domain());

    let session = Mutex::new(CrawlSession::new(&config.start_url, config.max_pages));
    let wakeup = Notify::new();
    let context = WorkerContext {
        fetcher,
        scoring,
        url_filter: &url_filter,
        request_timeout: config.request_timeout(),
        session: &session,
        wakeup: &wakeup,
    };

    let num_workers = config.max_concurrency.max(1);
    let started = Instant::now();
    join_all((0..num_workers).map(|worker_id| worker_processing_loop(worker_id, &context))).await;

    let session = session.into_inner();
    ::log::info!(
        "Crawling complete - {} pages in {:.2} seconds, {} URLs left in frontier",
        session.visited_count(),
        started.elapsed().as_secs_f64(),
        session.frontier_len()
    );

    Ok(session.into_pages())
}

/// Creates a URL filter based on the root URL and configuration
fn create_url_filter(root_url: &Url, config: &CrawlerConfig) -> Result<UrlFilter, ConfigError> {
    let filter_config = UrlFilterConfig {
        include_patterns: config.include_patterns.clone(),
        exclude_patterns: config.exclude_patterns.clone(),
        ..UrlFilterConfig::for_start_url(root_url)
    };

    Ok(UrlFilter::new(filter_config)?)
}

/// Main processing loop for a worker
///
/// Takes URLs from the session until it reports `Done`, parking on the
/// wakeup signal while other workers hold the remaining work.
async fn worker_processing_loop<F: Fetcher>(worker_id: usize, context: &WorkerContext<'_, F>) {
    ::log::trace!("Worker {} starting processing loop", worker_id);

    loop {
        // Registered before looking at the session so a wakeup sent in
        // between is not lost
        let notified = context.wakeup.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        let next = context.session.lock().await.next_url();
        match next {
            NextUrl::Fetch(url) => {
                let outcome = process_url(worker_id, context, &url).await;
                {
                    let mut session = context.session.lock().await;
                    match outcome {
                        Some((page, links)) => session.record_page(page, links),
                        None => session.record_failure(&url),
                    }
                }
                context.wakeup.notify_waiters();
            }
            NextUrl::Wait => notified.await,
            NextUrl::Done => {
                context.wakeup.notify_waiters();
                break;
            }
        }
    }

    ::log::trace!("Worker {} completed processing loop", worker_id);
}

/// Fetches, parses and scores one page, returning it with its in-scope links
async fn process_url<F: Fetcher>(
    worker_id: usize,
    context: &WorkerContext<'_, F>,
    url: &str,
) -> Option<(PageResult, Vec<String>)> {
    let worker_start = Instant::now();
    ::log::debug!("Worker {} fetching: {}", worker_id, url);

    let body = match fetch_with_timeout(context, url).await {
        Ok(body) => body,
        Err(e) => {
            ::log::warn!("Skipping {}: {}", url, e);
            return None;
        }
    };

    let parsed = parsers::parse(&body);
    let page = PageResult::new(
        url.to_string(),
        PageType::from_url(url),
        personas::score_page(&parsed.content, context.scoring),
    );
    let links = context.url_filter.resolve_links(url, &parsed.links);

    ::log::info!(
        "Scored {} ({}), queuing {} of {} links",
        url,
        page.page_type,
        links.len(),
        parsed.links.len()
    );
    ::log::debug!(
        "Worker {} processed {} in {:.2} seconds",
        worker_id,
        url,
        worker_start.elapsed().as_secs_f64()
    );

    Some((page, links))
}

/// Bounds every fetch, whatever the fetcher's own timeout policy
async fn fetch_with_timeout<F: Fetcher>(
    context: &WorkerContext<'_, F>,
    url: &str,
) -> Result<String, FetchError> {
    match tokio::time::timeout(context.request_timeout, context.fetcher.fetch(url)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(context.request_timeout)),
    }
}
